mod crawl_tests;
mod sync_tests;
