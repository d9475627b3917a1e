// Peregrine Assembler and SHIMMER Genome Assembly Toolkit
// 2019, 2020, 2021- (c) by Jason, Chen-Shan, Chin
//
// This Source Code Form is subject to the terms of the
// Creative Commons Attribution-NonCommercial-ShareAlike 4.0 International License.
//
// You should have received a copy of the license along with this
// work. If not, see <http://creativecommons.org/licenses/by-nc-sa/4.0/>.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BogError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{file}:{line}: {msg}")]
    Parse {
        file: String,
        line: usize,
        msg: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    // corrupt input or a bug, the pass can not be trusted after this
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl BogError {
    pub fn parse<F: Into<String>, M: Into<String>>(file: F, line: usize, msg: M) -> Self {
        BogError::Parse {
            file: file.into(),
            line,
            msg: msg.into(),
        }
    }
}
