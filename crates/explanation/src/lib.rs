mod error;
mod normalize;
mod resolve;
mod types;

pub use error::MalformedResponse;
pub use normalize::{ClaimShape, detect_shape, normalize, normalize_slice};
pub use resolve::{Resolution, resolve};
pub use types::{Claim, EvidenceCitation, Explanation};
