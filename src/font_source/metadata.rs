//! Naming-table metadata
//!
//! Populates the UFO font info with family/style naming before the
//! transformed font is saved and handed to the binary compiler.

use serde::{Deserialize, Serialize};

const OFL_TEXT: &str = "This Font Software is licensed under the SIL Open Font License, \
Version 1.1. This Font Software is distributed on an \"AS IS\" BASIS, WITHOUT WARRANTIES \
OR CONDITIONS OF ANY KIND, either express or implied. See the SIL Open Font License for \
the specific language, permissions and limitations governing your use of this Font Software.";

const OFL_URL: &str = "http://scripts.sil.org/OFL";

/// Naming fields applied to the output font.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontNaming {
    pub family: String,
    pub style: String,
    pub designer: String,
    pub vendor_id: String,
    pub license: String,
    pub license_url: String,
}

impl Default for FontNaming {
    fn default() -> Self {
        Self {
            family: "Kadomaru JP".into(),
            style: "Regular".into(),
            designer: "Kadomaru Project".into(),
            vendor_id: "KDMR".into(),
            license: OFL_TEXT.into(),
            license_url: OFL_URL.into(),
        }
    }
}

impl FontNaming {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.family, self.style)
    }

    /// PostScript name: full name with spaces stripped out.
    pub fn postscript_name(&self) -> String {
        format!(
            "{}-{}",
            self.family.replace(' ', ""),
            self.style.replace(' ', "")
        )
    }
}

/// Write the naming fields onto the font's info table.
pub fn apply_naming(font: &mut norad::Font, naming: &FontNaming) {
    let info = &mut font.font_info;
    info.family_name = Some(naming.family.clone());
    info.style_name = Some(naming.style.clone());
    info.style_map_family_name = Some(naming.family.clone());
    info.version_major = Some(1);
    info.version_minor = Some(0);
    info.postscript_font_name = Some(naming.postscript_name());
    info.postscript_full_name = Some(naming.full_name());
    info.open_type_name_preferred_family_name = Some(naming.family.clone());
    info.open_type_name_preferred_subfamily_name = Some(naming.style.clone());
    info.open_type_name_compatible_full_name = Some(naming.full_name());
    info.open_type_name_unique_id = Some(format!("{}-{}", naming.vendor_id, naming.style));
    info.open_type_os2_vendor_id = Some(naming.vendor_id.clone());
    info.open_type_name_manufacturer = Some(naming.designer.clone());
    info.open_type_name_designer = Some(naming.designer.clone());
    info.open_type_name_license = Some(naming.license.clone());
    info.open_type_name_license_url = Some(naming.license_url.clone());
}
