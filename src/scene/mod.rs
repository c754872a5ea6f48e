pub(crate) mod graph;
pub(crate) mod headless;
