//! Shader backend.

use crate::shader::{ProgramError, StageError, StageType, UniformLocation, UniformValue};

/// Shader backend.
///
/// A program goes through: stage compilation ([`Shader::new_stage`]), program creation with both
/// stages attached ([`Shader::new_program`]), link ([`Shader::link_program`]) and finally stage
/// release ([`Shader::destroy_stage`]).
pub unsafe trait Shader {
  type StageRepr;

  type ProgramRepr;

  /// Compile a stage. On failure, the backend releases whatever it allocated and returns the
  /// compiler log without reporting it.
  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  unsafe fn destroy_stage(stage: &mut Self::StageRepr);

  /// Create a program with `vertex` and `fragment` attached. The program is not linked yet.
  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError>;

  /// Link the program. Its stages stay attached until they are destroyed.
  ///
  /// A failed link returns the linker log; the program still exists and must still be destroyed.
  unsafe fn link_program(program: &Self::ProgramRepr) -> Result<(), ProgramError>;

  unsafe fn use_program(program: &Self::ProgramRepr);

  unsafe fn unuse_program(program: &Self::ProgramRepr);

  /// Query the location of a uniform.
  ///
  /// Names absent from the linked program resolve to [`UniformLocation::INACTIVE`].
  unsafe fn uniform_location(program: &Self::ProgramRepr, name: &str) -> UniformLocation;

  /// Set a uniform of the **currently used** program.
  unsafe fn set_uniform(program: &Self::ProgramRepr, location: UniformLocation, value: UniformValue);

  unsafe fn destroy_program(program: &mut Self::ProgramRepr);
}
