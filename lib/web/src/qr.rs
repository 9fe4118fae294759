use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use qrcode::render::svg;
use qrcode::QrCode;

/// Encodes `url` as a QR code and returns it as an SVG `data:` URL.
pub fn qr_data_url(url: &str) -> anyhow::Result<String> {
    let code = QrCode::new(url.as_bytes())?;
    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(200, 200)
        .quiet_zone(true)
        .build();
    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(image)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_svg_data_url() {
        let data_url = qr_data_url("http://localhost:3000/articles/abc").unwrap();
        let encoded = data_url.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains("<svg"));
    }
}
