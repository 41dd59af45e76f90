use crate::node::ContentNode;
use serde::Serialize;

const GALLERY_IMAGES: &str = "galleryImages";

/// Circular image carousel around a central message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopingCircleGallery {
    pub gallery_message: Option<String>,
    pub gallery_images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub image_path: String,
    pub image_alt: Option<String>,
    /// Position among kept images, so dropped items leave no gaps.
    pub index: usize,
}

impl LoopingCircleGallery {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        let gallery_images = node
            .items(GALLERY_IMAGES)
            .iter()
            .filter_map(|item| {
                let image_path = item.text("imagePath")?;
                Some((image_path, item.text("imageAlt")))
            })
            .enumerate()
            .map(|(index, (image_path, image_alt))| GalleryImage {
                image_path,
                image_alt,
                index,
            })
            .collect();
        LoopingCircleGallery {
            gallery_message: node.text("galleryMessage"),
            gallery_images,
        }
    }

    pub fn has_images(&self) -> bool {
        !self.gallery_images.is_empty()
    }
}
