//! Supported content locales.

string_enum! {
    /// Display language of localized content.
    Locale {
        En => "en",
        Th => "th",
    }
}

impl Locale {
    /// Pick the localized variant of a bilingual field.
    ///
    /// English falls back to the Thai text when no translation was entered.
    pub fn pick<'a>(self, en: &'a str, th: &'a str) -> &'a str {
        match self {
            Locale::En if !en.trim().is_empty() => en,
            _ => th,
        }
    }

    /// Same as [`Locale::pick`] for an optional English field.
    pub fn pick_opt<'a>(self, en: Option<&'a str>, th: &'a str) -> &'a str {
        self.pick(en.unwrap_or_default(), th)
    }
}
