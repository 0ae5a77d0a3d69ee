pub(super) mod common;
