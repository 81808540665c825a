//! Core plumbing shared by every endpoint:
//! - `http`: the `Transport` seam and its reqwest implementation
//! - `local`: an offline transport over saved pages
//! - `extract`: decoding of embedded data blocks
//! - `addressing`: URL construction and argument validation

pub mod addressing;
pub mod extract;
pub mod http;
pub mod local;

pub use addressing::{build_request, check_args, CheckedArgs};
pub use extract::{extract, parse, project};
pub use http::{HttpTransport, Request, Response, Transport};
pub use local::LocalTransport;
