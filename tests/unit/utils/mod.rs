mod test_retry;
mod test_validation;
