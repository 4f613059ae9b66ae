/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
use std::error::Error;
use std::fmt;

pub type AdaptaResult<T> = Result<T, AdaptaError>;

/// The crate-wide error: a message with an optional underlying cause.
#[derive(Debug)]
pub struct AdaptaError {
    msg: Box<dyn Error + Send + Sync>,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl AdaptaError {
    pub fn new<E: Into<Box<dyn Error + Send + Sync + 'static>>>(msg: E) -> Self {
        Self { msg: msg.into(), source: None }
    }

    pub fn with_source<S: Into<Box<dyn Error + Send + Sync + 'static>>>(self, source: S) -> Self {
        Self { msg: self.msg, source: Some(source.into()) }
    }
}

impl fmt::Display for AdaptaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl Error for AdaptaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.source {
            Some(source) => Some(source.as_ref()),
            None => None,
        }
    }
}

#[macro_export]
macro_rules! err {
    ($cause:expr; $msg:expr) => {{
        $crate::error::AdaptaError::new($msg).with_source($cause)
    }};
    ($cause:expr; $msg:expr, $($args:tt)*) => {{
        $crate::error::AdaptaError::new(format!($msg, $($args)*)).with_source($cause)
    }};
    ($msg:expr) => {{
        $crate::error::AdaptaError::new($msg)
    }};
    ($msg:expr, $($args:tt)*) => {{
        $crate::error::AdaptaError::new(format!($msg, $($args)*))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err;

    #[test]
    fn test_error_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = err!(io; "Unable to open snapshot '{}'", "planned.csv");
        assert_eq!(err.to_string(), "Unable to open snapshot 'planned.csv'");
        assert_eq!(err.source().unwrap().to_string(), "missing");
    }
}
