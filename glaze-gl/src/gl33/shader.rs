use crate::gl33::{state::GLState, GL33};
use gl::{self, types::*};
use glaze::backend::shader::Shader;
use glaze::shader::{ProgramError, StageError, StageType, UniformLocation, UniformValue};
use std::{
  cell::RefCell,
  ffi::CString,
  ptr::{null, null_mut},
  rc::Rc,
};

#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
  ty: StageType,
}

impl Stage {
  pub fn ty(&self) -> StageType {
    self.ty
  }
}

#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Program {
  fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked: GLint = gl::FALSE.into();
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == gl::TRUE.into() {
        Ok(())
      } else {
        let mut log_len: GLint = 0;
        gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
        gl::GetProgramInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

        Err(ProgramError::LinkFailed(info_log(log)))
      }
    }
  }
}

unsafe impl Shader for GL33 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let c_src = CString::new(src.as_bytes()).map_err(|_| {
      StageError::CompilationFailed(ty, "source contains a nul byte".to_owned())
    })?;

    let handle = gl::CreateShader(opengl_shader_type(ty));

    if handle == 0 {
      return Err(StageError::CompilationFailed(
        ty,
        "unable to create shader stage".to_owned(),
      ));
    }

    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(Stage { handle, ty })
    } else {
      let mut log_len: GLint = 0;
      gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
      gl::GetShaderInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

      gl::DeleteShader(handle);

      Err(StageError::CompilationFailed(ty, info_log(log)))
    }
  }

  unsafe fn destroy_stage(stage: &mut Self::StageRepr) {
    gl::DeleteShader(stage.handle);
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = gl::CreateProgram();

    if handle == 0 {
      return Err(ProgramError::CreationFailed);
    }

    gl::AttachShader(handle, vertex.handle);
    gl::AttachShader(handle, fragment.handle);

    Ok(Program {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn link_program(program: &Self::ProgramRepr) -> Result<(), ProgramError> {
    program.link()?;
    gl::ValidateProgram(program.handle);

    Ok(())
  }

  unsafe fn use_program(program: &Self::ProgramRepr) {
    program.state.borrow_mut().use_program(program.handle);
  }

  unsafe fn unuse_program(program: &Self::ProgramRepr) {
    program.state.borrow_mut().use_program(0);
  }

  unsafe fn uniform_location(program: &Self::ProgramRepr, name: &str) -> UniformLocation {
    let c_name = match CString::new(name.as_bytes()) {
      Ok(c_name) => c_name,
      Err(_) => return UniformLocation::INACTIVE,
    };

    let location = gl::GetUniformLocation(program.handle, c_name.as_ptr() as *const GLchar);

    if location < 0 {
      UniformLocation::INACTIVE
    } else {
      UniformLocation::new(location)
    }
  }

  unsafe fn set_uniform(_: &Self::ProgramRepr, location: UniformLocation, value: UniformValue) {
    let location = location.index();

    match value {
      UniformValue::Int(x) => gl::Uniform1i(location, x),
      UniformValue::Float(x) => gl::Uniform1f(location, x),
      UniformValue::Vec4([x, y, z, w]) => gl::Uniform4f(location, x, y, z, w),
      UniformValue::Mat4(m) => {
        gl::UniformMatrix4fv(location, 1, gl::FALSE, m.as_ptr() as *const GLfloat)
      }
    }
  }

  unsafe fn destroy_program(program: &mut Self::ProgramRepr) {
    program.state.borrow_mut().forget_program(program.handle);
    gl::DeleteProgram(program.handle);
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

// info logs are nul-terminated
fn info_log(mut log: Vec<u8>) -> String {
  while log.last() == Some(&0) {
    log.pop();
  }

  String::from_utf8_lossy(&log).into_owned()
}
