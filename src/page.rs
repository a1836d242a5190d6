// Names of the mountable pages. Kept free of browser types for host tests.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    CardScanner,
    ParticleCanvas,
    CodeRain,
    TextParticles,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [
        PageKind::CardScanner,
        PageKind::ParticleCanvas,
        PageKind::CodeRain,
        PageKind::TextParticles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::CardScanner => "card-scanner",
            PageKind::ParticleCanvas => "particle-canvas",
            PageKind::CodeRain => "code-rain",
            PageKind::TextParticles => "text-particles",
        }
    }

    /// Case and surrounding whitespace are ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(name))
    }
}
