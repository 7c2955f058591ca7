//! Deferred driver error probing.
//!
//! Graphics drivers don’t report errors at the point of the failing call. Instead, they raise a
//! sticky flag which must be polled explicitly; an error raised by a call might only be observed
//! several calls later. Because of that, errors are never turned into `Result`s by this crate.
//! Instead, an [`ErrorProbe`] is used around the calls you want to inspect:
//!
//! 1. [`ErrorProbe::clear`] drains whatever errors were pending, without reporting them;
//! 2. the call is issued;
//! 3. [`ErrorProbe::check`] drains the errors again, logging one diagnostic line per error.
//!
//! The [`gl_call!`] macro does the three steps at once and records the call text and source
//! location for you.
//!
//! What happens when a check fails depends on the [`FailurePolicy`]: debug builds stop right away
//! so that the offending call is still on the stack; release builds only log.

use crate::backend::probe::ErrorQuery;
use crate::context::GraphicsContext;
use std::fmt;

/// A decoded deferred error.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DriverError {
  /// An unacceptable value was passed for an enumerated argument.
  InvalidEnum,
  /// A numeric argument is out of range.
  InvalidValue,
  /// The operation is not allowed in the current state.
  InvalidOperation,
  /// The framebuffer object is not complete.
  InvalidFramebufferOperation,
  /// Not enough memory left to execute the command.
  OutOfMemory,
  /// An operation would have caused an internal stack to underflow.
  StackUnderflow,
  /// An operation would have caused an internal stack to overflow.
  StackOverflow,
  /// Any other non-zero code.
  Unknown(u32),
}

impl DriverError {
  /// Decode a raw error code. `0` means “no error”.
  pub fn from_code(code: u32) -> Option<Self> {
    match code {
      0 => None,
      0x0500 => Some(DriverError::InvalidEnum),
      0x0501 => Some(DriverError::InvalidValue),
      0x0502 => Some(DriverError::InvalidOperation),
      0x0503 => Some(DriverError::StackOverflow),
      0x0504 => Some(DriverError::StackUnderflow),
      0x0505 => Some(DriverError::OutOfMemory),
      0x0506 => Some(DriverError::InvalidFramebufferOperation),
      _ => Some(DriverError::Unknown(code)),
    }
  }

  /// Raw error code, as the driver reports it.
  pub fn code(&self) -> u32 {
    match *self {
      DriverError::InvalidEnum => 0x0500,
      DriverError::InvalidValue => 0x0501,
      DriverError::InvalidOperation => 0x0502,
      DriverError::StackOverflow => 0x0503,
      DriverError::StackUnderflow => 0x0504,
      DriverError::OutOfMemory => 0x0505,
      DriverError::InvalidFramebufferOperation => 0x0506,
      DriverError::Unknown(code) => code,
    }
  }

  /// Human-readable reason.
  pub fn reason(&self) -> &'static str {
    match *self {
      DriverError::InvalidEnum => "an unacceptable value is specified for an enumerated argument",
      DriverError::InvalidValue => "a numeric argument is out of range",
      DriverError::InvalidOperation => "the specified operation is not allowed in the current state",
      DriverError::InvalidFramebufferOperation => "the framebuffer object is not complete",
      DriverError::OutOfMemory => "there is not enough memory left to execute the command",
      DriverError::StackUnderflow => {
        "an attempt has been made to perform an operation that would cause an internal stack to underflow"
      }
      DriverError::StackOverflow => {
        "an attempt has been made to perform an operation that would cause an internal stack to overflow"
      }
      DriverError::Unknown(_) => "unrecognized error",
    }
  }
}

impl fmt::Display for DriverError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    let name = match *self {
      DriverError::InvalidEnum => "GL_INVALID_ENUM",
      DriverError::InvalidValue => "GL_INVALID_VALUE",
      DriverError::InvalidOperation => "GL_INVALID_OPERATION",
      DriverError::InvalidFramebufferOperation => "GL_INVALID_FRAMEBUFFER_OPERATION",
      DriverError::OutOfMemory => "GL_OUT_OF_MEMORY",
      DriverError::StackUnderflow => "GL_STACK_UNDERFLOW",
      DriverError::StackOverflow => "GL_STACK_OVERFLOW",
      DriverError::Unknown(_) => "GL_UNKNOWN_ERROR",
    };

    write!(f, "{}: {}", name, self.reason())
  }
}

/// What to do when a check observes errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailurePolicy {
  /// Report, then panic.
  Abort,
  /// Report only.
  Log,
}

impl Default for FailurePolicy {
  /// [`FailurePolicy::Abort`] with debug assertions on, [`FailurePolicy::Log`] otherwise.
  fn default() -> Self {
    if cfg!(debug_assertions) {
      FailurePolicy::Abort
    } else {
      FailurePolicy::Log
    }
  }
}

/// Drains and reports the driver’s deferred errors.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ErrorProbe {
  policy: FailurePolicy,
}

impl ErrorProbe {
  /// Create a probe with the given failure policy.
  pub fn new(policy: FailurePolicy) -> Self {
    ErrorProbe { policy }
  }

  pub fn policy(&self) -> FailurePolicy {
    self.policy
  }

  /// Drain pending errors without reporting them.
  ///
  /// Returns the number of errors that were dropped.
  pub fn clear<C>(&self, ctx: &mut C) -> usize
  where
    C: GraphicsContext,
    C::Backend: ErrorQuery,
  {
    drain(ctx).len()
  }

  /// Drain pending errors and report each of them, attributing them to `call` at `file:line`.
  ///
  /// Returns `true` if no error was pending.
  ///
  /// # Panics
  ///
  /// With [`FailurePolicy::Abort`], panics after reporting if at least one error was pending.
  pub fn check<C>(&self, ctx: &mut C, call: &str, file: &str, line: u32) -> bool
  where
    C: GraphicsContext,
    C::Backend: ErrorQuery,
  {
    let errors = drain(ctx);

    for err in &errors {
      log::error!(
        "[driver error] ({:#06x}): {} {}(line {}): {}",
        err.code(),
        call,
        file,
        line,
        err
      );
    }

    if errors.is_empty() {
      return true;
    }

    if self.policy == FailurePolicy::Abort {
      panic!(
        "{} driver error(s) raised by `{}` at {}:{}",
        errors.len(),
        call,
        file,
        line
      );
    }

    false
  }
}

/// Drain every pending error, oldest first.
pub fn drain<C>(ctx: &mut C) -> Vec<DriverError>
where
  C: GraphicsContext,
  C::Backend: ErrorQuery,
{
  let mut errors = Vec::new();

  while let Some(err) = unsafe { ctx.backend().poll_error() } {
    errors.push(err);
  }

  errors
}

/// Wrap a call with [`ErrorProbe::clear`] and [`ErrorProbe::check`].
///
/// ```ignore
/// let probe = ErrorProbe::default();
/// gl_call!(probe, &mut ctx, renderer.draw(&mut ctx, &va, &ib, &program));
/// ```
///
/// The value of the wrapped expression is returned.
#[macro_export]
macro_rules! gl_call {
  ($probe:expr, $ctx:expr, $call:expr) => {{
    $probe.clear($ctx);
    let value = $call;
    $probe.check($ctx, stringify!($call), file!(), line!());
    value
  }};
}
