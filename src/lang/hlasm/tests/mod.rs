//! Tests of the HLASM analysis modules.

mod tokenize_test;
mod catalogue_test;
mod completions_test;
