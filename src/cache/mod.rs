mod code_cache;

pub use code_cache::CodeCache;
