use crate::error::SpmError;

pub fn get_exit_code(error: &SpmError) -> i32 {
    match error {
        SpmError::Validation(_) | SpmError::InvalidConfig(_) | SpmError::ConfigFile(_) => 2,

        SpmError::Io(_) | SpmError::Json(_) => 1,
    }
}
