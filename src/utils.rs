use std::fmt::Display;

use log::{error, info};

pub fn print_err(e: &impl Display) {
    error!("{e:#}")
}

pub fn print_err_info(e: &impl Display) {
    info!("{e:#}")
}

pub trait ResultExt {
    fn print_err(self);
    fn print_err_info(self);
}

impl<T> ResultExt for Result<T, anyhow::Error> {
    fn print_err(self) {
        let _ = self.inspect_err(print_err);
    }

    fn print_err_info(self) {
        let _ = self.inspect_err(print_err_info);
    }
}

/// Logs the error and falls back to the default value.
pub fn unwrap_or_def_verbose<T, E>(result: Result<T, E>) -> T
where
    T: Default,
    E: Display,
{
    result
        .inspect_err(|e| {
            error!("ERROR: {e:#}");
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use anyhow::format_err;

    use super::*;

    #[test]
    fn test_unwrap_or_def_verbose() {
        assert_eq!(unwrap_or_def_verbose(Ok::<_, anyhow::Error>(7)), 7);
        assert_eq!(
            unwrap_or_def_verbose(Err::<String, _>(format_err!("broken config"))),
            String::new()
        );
    }

    #[test]
    fn test_print_err_passes_ok() {
        Ok::<_, anyhow::Error>(()).print_err();
        Err::<(), _>(format_err!("logged")).print_err_info();
    }
}
