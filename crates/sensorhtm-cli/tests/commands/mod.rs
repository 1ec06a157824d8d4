mod describe_test;
mod models_test;
mod params_test;
mod timestamp_test;
