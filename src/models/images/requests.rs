use serde::Deserialize;

// 图片登记请求，img_url 为上传完成后的访问地址
#[derive(Debug, Deserialize)]
pub struct RegisterImageRequest {
    pub img_url: String,
}
