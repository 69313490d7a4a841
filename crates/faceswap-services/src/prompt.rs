use faceswap_core::AspectRatio;

/// Instruction sent after both images.
pub const FACE_SWAP_PROMPT: &str = "Make the person's face from picture number 1 replace the face in picture number 2. \n\
You can change the clothes but only one thing: don't change the hairstyle or anything about the character from picture number 1.
Keep the same face of the person from picture one, don't change anything about their skin or face.
Change the position of the person to make the picture look natural and well composed.

Picture 1 is the user's face photo.
Picture 2 is the template/background image.

Create the final image with the face from picture 1 placed onto picture 2's scene/pose.";

pub const USER_IMAGE_LABEL: &str = "Picture 1 (User's face):";
pub const TEMPLATE_IMAGE_LABEL: &str = "Picture 2 (Template/Background):";

/// Fixed prompt, with the aspect ratio instruction appended when one was requested.
pub fn compose_prompt(aspect_ratio: Option<&AspectRatio>) -> String {
    match aspect_ratio {
        Some(ratio) => format!(
            "{}\n\nGenerate the output image with aspect ratio {}.",
            FACE_SWAP_PROMPT, ratio
        ),
        None => FACE_SWAP_PROMPT.to_string(),
    }
}
