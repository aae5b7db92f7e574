mod common;
mod disqualify;
