//! kashi-fetch - song lyrics retrieval from Japanese lyric-listing sites
//!
//! This library resolves a song identifier (full page URL or bare song code)
//! against a roster of supported sites, fetches the pages involved and
//! extracts a normalized [`Header`] plus line-indexed [`Lyrics`].
//!
//! ```no_run
//! use kashi_fetch::FetchRequest;
//!
//! let request = FetchRequest::new().site("uta-net.com").page("162989");
//! let result = kashi_fetch::fetch(&request)?;
//! println!("{}", result.header.title());
//! # Ok::<(), kashi_fetch::FetchError>(())
//! ```

pub mod agent;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod model;
pub mod pipeline;

mod http;
mod registry;
mod sites;
mod text;

pub use dispatch::{fetch, resolve, FetchRequest, AUTO_DETECT};
pub use error::{FetchError, Result};
pub use model::{FetchResult, Header, HeaderItem, HeaderValue, Lyrics};
pub use pipeline::SongPipeline;
pub use text::NameSet;
