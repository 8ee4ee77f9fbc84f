/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AerodriftError>;

/// note that linking, projection and simulation never fail - degenerate input is filtered, not reported.
/// Errors only come from the edges (config files and raw input documents)
#[derive(Error,Debug)]
pub enum AerodriftError {

    #[error("config error {0}")]
    ConfigError( #[from] ron::error::SpannedError),

    #[error("RON error {0}")]
    RonError( #[from] ron::Error),

    #[error("invalid config value {0}")]
    InvalidConfigError(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("parse error {0}")]
    ParseError(String),
}

pub fn invalid_config (msg: impl ToString)->AerodriftError {
    AerodriftError::InvalidConfigError(msg.to_string())
}

macro_rules! parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::AerodriftError::ParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use parse_error;
