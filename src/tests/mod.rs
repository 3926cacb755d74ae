#[cfg(test)]
mod support;

mod diagnostics_test;
mod lookup_table_test;
