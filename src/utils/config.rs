/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use std::env;
use std::fmt::Debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, error};

/// Gets an environment variable or returns a default value if not found or cannot be parsed
///
/// # Arguments
///
/// * `env_var` - The name of the environment variable
/// * `default` - The default value to use if the environment variable is not found or cannot be parsed
///
/// # Returns
///
/// The parsed value of the environment variable or the default value
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

/// Reads the first line of a file, with trailing whitespace stripped
///
/// Returns `None` when the file does not exist or cannot be read; an unreadable
/// secret file is treated the same as a missing one.
pub fn read_first_line(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!("Cannot open {}: {e}", path.display());
            return None;
        }
    };
    let mut line = String::new();
    match BufReader::new(file).read_line(&mut line) {
        Ok(_) => Some(line.trim_end().to_string()),
        Err(e) => {
            debug!("Cannot read {}: {e}", path.display());
            None
        }
    }
}

/// Drops values that are empty or whitespace only
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
