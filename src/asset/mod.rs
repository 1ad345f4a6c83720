mod path;

pub use path::{AssetPath, META_SUFFIX};
