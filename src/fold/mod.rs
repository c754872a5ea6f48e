pub(crate) mod direction;
pub(crate) mod joint;
pub(crate) mod plan;
pub(crate) mod pose;
