pub(crate) const READ_BUFFER_SIZE: usize = 128 * 1024;
