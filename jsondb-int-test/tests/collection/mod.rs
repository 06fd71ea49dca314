mod find_test;
mod insert_test;
mod lifecycle_test;
mod update_test;
