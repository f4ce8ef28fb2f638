pub mod interpreters;
