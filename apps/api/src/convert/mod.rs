pub mod pandoc;
