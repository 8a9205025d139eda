mod deviation_analysis_test;
mod deviation_test;
