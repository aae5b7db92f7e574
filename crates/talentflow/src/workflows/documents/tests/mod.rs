mod common;
mod fill;
