mod jobs_tests;
mod markers_tests;
mod properties_tests;
