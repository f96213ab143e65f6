//! Report palette, type scale and section labels

/// Color representation (RGB components 0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

/// Corporate blue, headings accent and separator rules (#007BFF)
pub const PRIMARY: Color = Color::rgb(0.0, 0.482, 1.0);
/// Dark blue for main heading text (#0A285A)
pub const TEXT_HEADER: Color = Color::rgb(0.039, 0.157, 0.353);
/// Dark gray for metadata and secondary headings (#646464)
pub const SECONDARY: Color = Color::rgb(0.392, 0.392, 0.392);
/// Very light gray for solid header fallback blocks (#F5F5F5)
pub const ACCENT: Color = Color::rgb(0.961, 0.961, 0.961);
/// Footer gray (#808080)
pub const FOOTER: Color = Color::rgb(0.502, 0.502, 0.502);
/// Body text
pub const BODY: Color = Color::black();

pub const APP_TITLE_SIZE: f64 = 24.0;
pub const TITLE_SIZE: f64 = 16.0;
pub const CHAPTER_SIZE: f64 = 14.0;
pub const SECTION_SIZE: f64 = 12.0;
pub const BODY_SIZE: f64 = 11.0;
pub const META_SIZE: f64 = 10.0;
pub const FOOTER_SIZE: f64 = 8.0;

/// Localized (Spanish) section labels and placeholders.
pub mod labels {
    pub const REPORT_TITLE: &str = "Consejo LLM";
    pub const UNTITLED: &str = "Conversación Sin Título";
    pub const NO_ID: &str = "N/A";
    pub const ID_PREFIX: &str = "ID:";
    pub const DATE_PREFIX: &str = "Fecha:";
    pub const INITIAL_QUERY: &str = "Consulta Inicial";
    pub const MEMBER_RESPONSES: &str = "Respuestas de los Miembros del Consejo";
    pub const MEMBER_RESPONSES_CONT: &str = "Respuestas de los Miembros del Consejo (Cont.)";
    pub const MEMBER_PREFIX: &str = "Miembro:";
    pub const FINAL_RESOLUTION: &str = "Resolución Final del Presidente";
    pub const PRESIDENT_PREFIX: &str = "Presidente de la Sesión:";
    pub const UNKNOWN_MODEL: &str = "Modelo Desconocido";
    pub const UNKNOWN_PRESIDENT: &str = "Desconocido";
    pub const PAGE_PREFIX: &str = "Página";
}
