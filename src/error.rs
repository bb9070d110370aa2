// PanView -- Pannable, zoomable image viewport with crop-before-resample rendering
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of PanView.
//
// PanView is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::fmt;

pub type PanviewResult<T> = Result<T, PanviewError>;

#[derive(Debug)]
pub enum PanviewError {
    Io(std::io::Error),
    Image(image::ImageError),
    Json(serde_json::Error),
    /// Configuration values that cannot drive a viewport
    Config(String),
    /// Command line or event script that could not be parsed
    Args(String),
}

impl fmt::Display for PanviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanviewError::Io(e) => write!(f, "I/O error: {e}"),
            PanviewError::Image(e) => write!(f, "image error: {e}"),
            PanviewError::Json(e) => write!(f, "json error: {e}"),
            PanviewError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            PanviewError::Args(msg) => write!(f, "invalid arguments: {msg}"),
        }
    }
}

impl std::error::Error for PanviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PanviewError::Io(e) => Some(e),
            PanviewError::Image(e) => Some(e),
            PanviewError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PanviewError {
    fn from(e: std::io::Error) -> Self {
        PanviewError::Io(e)
    }
}

impl From<image::ImageError> for PanviewError {
    fn from(e: image::ImageError) -> Self {
        PanviewError::Image(e)
    }
}

impl From<serde_json::Error> for PanviewError {
    fn from(e: serde_json::Error) -> Self {
        PanviewError::Json(e)
    }
}

impl From<pico_args::Error> for PanviewError {
    fn from(e: pico_args::Error) -> Self {
        PanviewError::Args(e.to_string())
    }
}

impl From<&str> for PanviewError {
    fn from(msg: &str) -> Self {
        PanviewError::Args(msg.to_string())
    }
}

impl From<String> for PanviewError {
    fn from(msg: String) -> Self {
        PanviewError::Args(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = PanviewError::Config("scale_step must be greater than 1".into());
        assert_eq!(
            e.to_string(),
            "invalid configuration: scale_step must be greater than 1"
        );

        let e: PanviewError = "missing OUTPUT".into();
        assert_eq!(e.to_string(), "invalid arguments: missing OUTPUT");
    }

    #[test]
    fn test_io_source() {
        use std::error::Error;
        let e: PanviewError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("I/O error"));
    }
}
