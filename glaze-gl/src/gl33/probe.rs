use crate::gl33::GL33;
use glaze::backend::probe::ErrorQuery;
use glaze::probe::DriverError;

unsafe impl ErrorQuery for GL33 {
  unsafe fn poll_error(&mut self) -> Option<DriverError> {
    DriverError::from_code(gl::GetError())
  }
}
