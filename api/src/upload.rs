use rocket::data::{Limits, ToByteUnit};
use rocket::form::{Errors, Form};
use rocket::fs::TempFile;
use rocket::http::ContentType;
use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;
use uuid::Uuid;

use service::error::GenericError;

use crate::authenticate::AuthenticatedUser;
use crate::config::AppConfig;

/// Largest accepted logo, in bytes.
pub const MAX_UPLOAD_SIZE: u64 = 5 * 1024 * 1024;

/// Rocket's form limits sit a little above [`MAX_UPLOAD_SIZE`] so oversized files reach the
/// handler and get a proper 400.
pub fn limits() -> Limits {
    Limits::default()
        .limit("file", 6.mebibytes())
        .limit("data-form", 7.mebibytes())
}

/// Accepted image subtypes. SVG is never accepted.
const ALLOWED_IMAGE_TYPES: [&str; 4] = ["png", "jpeg", "gif", "webp"];

fn is_allowed_image(content_type: &ContentType) -> bool {
    content_type.top() == "image"
        && ALLOWED_IMAGE_TYPES
            .iter()
            .any(|sub| content_type.sub().as_str().eq_ignore_ascii_case(sub))
}

#[derive(FromForm)]
pub(crate) struct LogoUpload<'r> {
    file: TempFile<'r>,
}

#[derive(Serialize, Debug)]
pub(crate) struct UploadedFile {
    url: String,
}

fn extension(content_type: &ContentType) -> String {
    content_type
        .extension()
        .map(|ext| ext.as_str().to_lowercase())
        .unwrap_or_else(|| content_type.sub().as_str().to_lowercase())
}

/// # Upload an image
///
/// Multipart field `file`, PNG, JPEG, GIF or WebP images up to 5 MiB. Returns the public `/uploads/...` url.
#[post("/upload", data = "<upload>")]
pub(crate) async fn upload(
    upload: Result<Form<LogoUpload<'_>>, Errors<'_>>,
    config: &State<AppConfig>,
    user: AuthenticatedUser,
) -> Result<Json<UploadedFile>, GenericError> {
    let mut upload = upload.map_err(|e| {
        log::warn!("Rejected upload from user {}: {e}", user.id());
        GenericError::BadRequest("A single image in the `file` field is required")
    })?;
    let file = &mut upload.file;

    let content_type = file
        .content_type()
        .filter(|ct| is_allowed_image(ct))
        .cloned()
        .ok_or(GenericError::BadRequest(
            "Only PNG, JPEG, GIF and WebP images can be uploaded",
        ))?;
    if file.len() > MAX_UPLOAD_SIZE {
        return Err(GenericError::BadRequest("Images may be at most 5 MB"));
    }

    let name = format!("{}.{}", Uuid::new_v4(), extension(&content_type));
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .map_err(|_| GenericError::UnknownError("Unable to create the upload directory"))?;
    file.move_copy_to(config.upload_dir.join(&name))
        .await
        .map_err(|e| {
            log::error!("Unable to store upload {name}: {e}");
            GenericError::UnknownError("Unable to store the file")
        })?;

    log::info!("User {} uploaded {name}", user.id());
    Ok(Json(UploadedFile {
        url: format!("/uploads/{name}"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_follows_content_type() {
        assert_eq!(extension(&ContentType::PNG), "png");
        assert_eq!(extension(&ContentType::new("image", "x-custom")), "x-custom");
    }

    #[test]
    fn only_raster_images_are_allowed() {
        assert!(is_allowed_image(&ContentType::PNG));
        assert!(is_allowed_image(&ContentType::JPEG));
        assert!(is_allowed_image(&ContentType::new("image", "WebP")));
        assert!(!is_allowed_image(&ContentType::SVG));
        assert!(!is_allowed_image(&ContentType::new("image", "x-custom")));
        assert!(!is_allowed_image(&ContentType::Plain));
    }
}
