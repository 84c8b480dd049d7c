// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Media uploads (multipart, field `file`).

use crate::client::{ApiClient, ApiRequest, FormPart};
use crate::error::ApiError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
}

#[derive(Clone)]
pub struct UploadService {
    api: ApiClient,
}

impl UploadService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<UploadedFile, ApiError> {
        self.upload("/upload/image", file_name, content_type, data)
            .await
    }

    pub async fn upload_video(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<UploadedFile, ApiError> {
        self.upload("/upload/video", file_name, content_type, data)
            .await
    }

    async fn upload(
        &self,
        path: &str,
        file_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<UploadedFile, ApiError> {
        tracing::info!(path, file_name, bytes = data.len(), "Uploading media");
        let request = ApiRequest::post(path).multipart(vec![FormPart::file(
            "file",
            file_name,
            content_type,
            data,
        )]);
        self.api.send_unwrapped(request).await
    }
}
