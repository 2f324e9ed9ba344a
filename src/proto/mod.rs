pub mod practice {
    tonic::include_proto!("practice");

    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("practice_descriptor");
}
