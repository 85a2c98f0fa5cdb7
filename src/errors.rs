// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The handful of ways a render can fail.  The computation itself is
//! total; everything here happens at the edges, either when the plane
//! is described badly or when the image cannot be written out.

use image::ImageError;
use std::io;

/// Fatal conditions for a render.  None of these are retried.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The requested pixel or complex plane cannot be mapped.
    #[fail(display = "bad plane: {}", _0)]
    BadPlane(String),

    /// The output file could not be created.
    #[fail(display = "could not create {}: {}", path, cause)]
    Create {
        /// The path we tried to create.
        path: String,
        /// What the filesystem said.
        #[fail(cause)]
        cause: io::Error,
    },

    /// The image could not be encoded into the output file.  The
    /// partial file is removed before this is returned.
    #[fail(display = "could not encode {}: {}", path, cause)]
    Encode {
        /// The path we were writing.
        path: String,
        /// What the encoder said.
        #[fail(cause)]
        cause: ImageError,
    },

    /// A worker or the histogram aggregator died before finishing.
    #[fail(display = "a render thread panicked")]
    WorkerPanic,
}
