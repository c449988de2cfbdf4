pub mod standard_pass;
