use axum::extract::Multipart;

/// An uploaded file with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Only `.pdf` filenames are accepted; content is not sniffed.
    pub fn is_pdf(&self) -> bool {
        is_pdf_filename(&self.filename)
    }
}

pub fn is_pdf_filename(filename: &str) -> bool {
    filename.ends_with(".pdf")
}

/// Pull the `file` field out of a multipart upload.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedFile, String> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();

                file = Some(UploadedFile { filename, data });
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    file.ok_or_else(|| "No file uploaded".to_string())
}
