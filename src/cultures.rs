//! Culture names and their tags.
//!
//! [`Culture`] enumerates the cultures known to the library together with their IETF-style tag
//! (`ja-JP`, `sr-Latn-CS`, ...). Neutral cultures (`Japanese`) share the tag of their default
//! region (`JapaneseJapan`).
//!
//! # Examples
//!
//! ```rust
//! use pure_ext::{cultures::Culture, enums::DisplayString};
//!
//! assert_eq!(Culture::JapaneseJapan.tag(), "ja-JP");
//! assert_eq!(Culture::JapaneseJapan.display_string(), "ja-JP");
//! assert_eq!(Culture::from_tag("ja-JP"), Some(Culture::Japanese));
//! ```

use strum::{AsRefStr, EnumCount, EnumIter, EnumProperty, EnumString, IntoEnumIterator};

use crate::enums::DISPLAY_PROPERTY;

/// A culture, rendered through its tag
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumCount,
    EnumIter,
    EnumProperty,
    EnumString,
)]
#[allow(missing_docs)]
pub enum Culture {
    #[strum(props(display = "af-ZA"))]
    Afrikaans,
    #[strum(props(display = "af-ZA"))]
    AfrikaansSouthAfrica,
    #[strum(props(display = "ar-SA"))]
    Arabic,
    #[strum(props(display = "ar-AE"))]
    ArabicUae,
    #[strum(props(display = "ar-BH"))]
    ArabicBahrain,
    #[strum(props(display = "ar-DZ"))]
    ArabicAlgeria,
    #[strum(props(display = "ar-EG"))]
    ArabicEgypt,
    #[strum(props(display = "ar-IQ"))]
    ArabicIraq,
    #[strum(props(display = "ar-JO"))]
    ArabicJordan,
    #[strum(props(display = "ar-KW"))]
    ArabicKuwait,
    #[strum(props(display = "ar-LB"))]
    ArabicLebanon,
    #[strum(props(display = "ar-LY"))]
    ArabicLibya,
    #[strum(props(display = "ar-MA"))]
    ArabicMorocco,
    #[strum(props(display = "ar-OM"))]
    ArabicOman,
    #[strum(props(display = "ar-QA"))]
    ArabicQatar,
    #[strum(props(display = "ar-SA"))]
    ArabicSaudiArabia,
    #[strum(props(display = "ar-SY"))]
    ArabicSyria,
    #[strum(props(display = "ar-TN"))]
    ArabicTunisia,
    #[strum(props(display = "ar-YE"))]
    ArabicYemen,
    #[strum(props(display = "az-Latn-AZ"))]
    Azeri,
    #[strum(props(display = "az-Cyrl-AZ"))]
    AzeriCyrillicAzerbaijan,
    #[strum(props(display = "az-Latn-AZ"))]
    AzeriLatinAzerbaijan,
    #[strum(props(display = "be-BY"))]
    Belarusian,
    #[strum(props(display = "be-BY"))]
    BelarusianBelarus,
    #[strum(props(display = "bg-BG"))]
    Bulgarian,
    #[strum(props(display = "bg-BG"))]
    BulgarianBulgaria,
    #[strum(props(display = "bs-Latn-BA"))]
    BosnianBosniaandHerzegovina,
    #[strum(props(display = "ca-ES"))]
    Catalan,
    #[strum(props(display = "ca-ES"))]
    CatalanCatalan,
    #[strum(props(display = "cs-CZ"))]
    Czech,
    #[strum(props(display = "cs-CZ"))]
    CzechCzechRepublic,
    #[strum(props(display = "cy-GB"))]
    WelshUnitedKingdom,
    #[strum(props(display = "da-DK"))]
    Danish,
    #[strum(props(display = "da-DK"))]
    DanishDenmark,
    #[strum(props(display = "de-DE"))]
    German,
    #[strum(props(display = "de-AT"))]
    GermanAustria,
    #[strum(props(display = "de-DE"))]
    GermanGermany,
    #[strum(props(display = "de-CH"))]
    GermanSwitzerland,
    #[strum(props(display = "de-LI"))]
    GermanLiechtenstein,
    #[strum(props(display = "de-LU"))]
    GermanLuxembourg,
    #[strum(props(display = "dv-MV"))]
    Divehi,
    #[strum(props(display = "dv-MV"))]
    DivehiMaldives,
    #[strum(props(display = "el-GR"))]
    Greek,
    #[strum(props(display = "el-GR"))]
    GreekGreece,
    #[strum(props(display = "en-US"))]
    English,
    #[strum(props(display = "en-029"))]
    EnglishCaribbean,
    #[strum(props(display = "en-AU"))]
    EnglishAustralia,
    #[strum(props(display = "en-BZ"))]
    EnglishBelize,
    #[strum(props(display = "en-CA"))]
    EnglishCanada,
    #[strum(props(display = "en-GB"))]
    EnglishUnitedKingdom,
    #[strum(props(display = "en-IE"))]
    EnglishIreland,
    #[strum(props(display = "en-JM"))]
    EnglishJamaica,
    #[strum(props(display = "en-NZ"))]
    EnglishNewZealand,
    #[strum(props(display = "en-PH"))]
    EnglishRepublicOfThePhilippines,
    #[strum(props(display = "en-TT"))]
    EnglishTrinidadandTobago,
    #[strum(props(display = "en-US"))]
    EnglishUnitedStates,
    #[strum(props(display = "en-ZA"))]
    EnglishSouthAfrica,
    #[strum(props(display = "en-ZW"))]
    EnglishZimbabwe,
    #[strum(props(display = "es-ES"))]
    Spanish,
    #[strum(props(display = "es-AR"))]
    SpanishArgentina,
    #[strum(props(display = "es-BO"))]
    SpanishBolivia,
    #[strum(props(display = "es-CL"))]
    SpanishChile,
    #[strum(props(display = "es-CO"))]
    SpanishColombia,
    #[strum(props(display = "es-CR"))]
    SpanishCostaRica,
    #[strum(props(display = "es-DO"))]
    SpanishDominicanRepublic,
    #[strum(props(display = "es-EC"))]
    SpanishEcuador,
    #[strum(props(display = "es-ES"))]
    SpanishSpain,
    #[strum(props(display = "es-GT"))]
    SpanishGuatemala,
    #[strum(props(display = "es-HN"))]
    SpanishHonduras,
    #[strum(props(display = "es-MX"))]
    SpanishMexico,
    #[strum(props(display = "es-NI"))]
    SpanishNicaragua,
    #[strum(props(display = "es-PA"))]
    SpanishPanama,
    #[strum(props(display = "es-PE"))]
    SpanishPeru,
    #[strum(props(display = "es-PR"))]
    SpanishPuertoRico,
    #[strum(props(display = "es-PY"))]
    SpanishParaguay,
    #[strum(props(display = "es-SV"))]
    SpanishElSalvador,
    #[strum(props(display = "es-UY"))]
    SpanishUruguay,
    #[strum(props(display = "es-VE"))]
    SpanishVenezuela,
    #[strum(props(display = "et-EE"))]
    Estonian,
    #[strum(props(display = "et-EE"))]
    EstonianEstonia,
    #[strum(props(display = "eu-ES"))]
    Basque,
    #[strum(props(display = "eu-ES"))]
    BasqueBasque,
    #[strum(props(display = "fa-IR"))]
    Persian,
    #[strum(props(display = "fa-IR"))]
    PersianIran,
    #[strum(props(display = "fi-FI"))]
    Finnish,
    #[strum(props(display = "fi-FI"))]
    FinnishFinland,
    #[strum(props(display = "fo-FO"))]
    Faroese,
    #[strum(props(display = "fo-FO"))]
    FaroeseFaroeIslands,
    #[strum(props(display = "fr-FR"))]
    French,
    #[strum(props(display = "fr-BE"))]
    FrenchBelgium,
    #[strum(props(display = "fr-CA"))]
    FrenchCanada,
    #[strum(props(display = "fr-FR"))]
    FrenchFrance,
    #[strum(props(display = "fr-CH"))]
    FrenchSwitzerland,
    #[strum(props(display = "fr-LU"))]
    FrenchLuxembourg,
    #[strum(props(display = "fr-MC"))]
    FrenchPrincipalityOfMonaco,
    #[strum(props(display = "gl-ES"))]
    Galician,
    #[strum(props(display = "gl-ES"))]
    GalicianGalician,
    #[strum(props(display = "gu-IN"))]
    Gujarati,
    #[strum(props(display = "gu-IN"))]
    GujaratiIndia,
    #[strum(props(display = "he-IL"))]
    Hebrew,
    #[strum(props(display = "he-IL"))]
    HebrewIsrael,
    #[strum(props(display = "hi-IN"))]
    Hindi,
    #[strum(props(display = "hi-IN"))]
    HindiIndia,
    #[strum(props(display = "hr-HR"))]
    Croatian,
    #[strum(props(display = "hr-BA"))]
    CroatianBosniaandHerzegovina,
    #[strum(props(display = "hr-HR"))]
    CroatianCroatia,
    #[strum(props(display = "hu-HU"))]
    Hungarian,
    #[strum(props(display = "hu-HU"))]
    HungarianHungary,
    #[strum(props(display = "hy-AM"))]
    Armenian,
    #[strum(props(display = "hy-AM"))]
    ArmenianArmenia,
    #[strum(props(display = "id-ID"))]
    Indonesian,
    #[strum(props(display = "id-ID"))]
    IndonesianIndonesia,
    #[strum(props(display = "is-IS"))]
    Icelandic,
    #[strum(props(display = "is-IS"))]
    IcelandicIceland,
    #[strum(props(display = "it-IT"))]
    Italian,
    #[strum(props(display = "it-CH"))]
    ItalianSwitzerland,
    #[strum(props(display = "it-IT"))]
    ItalianItaly,
    #[strum(props(display = "ja-JP"))]
    Japanese,
    #[strum(props(display = "ja-JP"))]
    JapaneseJapan,
    #[strum(props(display = "ka-GE"))]
    Georgian,
    #[strum(props(display = "ka-GE"))]
    GeorgianGeorgia,
    #[strum(props(display = "kk-KZ"))]
    Kazakh,
    #[strum(props(display = "kk-KZ"))]
    KazakhKazakhstan,
    #[strum(props(display = "kn-IN"))]
    Kannada,
    #[strum(props(display = "kn-IN"))]
    KannadaIndia,
    #[strum(props(display = "ko-KR"))]
    Korean,
    #[strum(props(display = "kok-IN"))]
    Konkani,
    #[strum(props(display = "kok-IN"))]
    KonkaniIndia,
    #[strum(props(display = "ko-KR"))]
    KoreanKorea,
    #[strum(props(display = "ky-KG"))]
    Kyrgyz,
    #[strum(props(display = "ky-KG"))]
    KyrgyzKyrgyzstan,
    #[strum(props(display = "lt-LT"))]
    Lithuanian,
    #[strum(props(display = "lt-LT"))]
    LithuanianLithuania,
    #[strum(props(display = "lv-LV"))]
    Latvian,
    #[strum(props(display = "lv-LV"))]
    LatvianLatvia,
    #[strum(props(display = "mi-NZ"))]
    MaoriNewZealand,
    #[strum(props(display = "mk-MK"))]
    Macedonian,
    #[strum(props(display = "mk-MK"))]
    MacedonianFormerYugoslavRepublicOfMacedonia,
    #[strum(props(display = "mn-MN"))]
    Mongolian,
    #[strum(props(display = "mn-MN"))]
    MongolianCyrillicMongolia,
    #[strum(props(display = "mr-IN"))]
    Marathi,
    #[strum(props(display = "mr-IN"))]
    MarathiIndia,
    #[strum(props(display = "ms-MY"))]
    Malay,
    #[strum(props(display = "ms-BN"))]
    MalayBruneiDarussalam,
    #[strum(props(display = "ms-MY"))]
    MalayMalaysia,
    #[strum(props(display = "mt-MT"))]
    MalteseMalta,
    #[strum(props(display = "nb-NO"))]
    NorwegianBokmalNorway,
    #[strum(props(display = "nl-NL"))]
    Dutch,
    #[strum(props(display = "nl-BE"))]
    DutchBelgium,
    #[strum(props(display = "nl-NL"))]
    DutchNetherlands,
    #[strum(props(display = "nn-NO"))]
    NorwegianNynorskNorway,
    #[strum(props(display = "nb-NO"))]
    Norwegian,
    #[strum(props(display = "ns-ZA"))]
    NorthernSothoSouthAfrica,
    #[strum(props(display = "pa-IN"))]
    Punjabi,
    #[strum(props(display = "pa-IN"))]
    PunjabiIndia,
    #[strum(props(display = "pl-PL"))]
    Polish,
    #[strum(props(display = "pl-PL"))]
    PolishPoland,
    #[strum(props(display = "pt-BR"))]
    Portuguese,
    #[strum(props(display = "pt-BR"))]
    PortugueseBrazil,
    #[strum(props(display = "pt-PT"))]
    PortuguesePortugal,
    #[strum(props(display = "quz-BO"))]
    QuechuaBolivia,
    #[strum(props(display = "quz-EC"))]
    QuechuaEcuador,
    #[strum(props(display = "quz-PE"))]
    QuechuaPeru,
    #[strum(props(display = "ro-RO"))]
    Romanian,
    #[strum(props(display = "ro-RO"))]
    RomanianRomania,
    #[strum(props(display = "ru-RU"))]
    Russian,
    #[strum(props(display = "ru-RU"))]
    RussianRussia,
    #[strum(props(display = "sa-IN"))]
    Sanskrit,
    #[strum(props(display = "sa-IN"))]
    SanskritIndia,
    #[strum(props(display = "se-FI"))]
    SamiNorthernFinland,
    #[strum(props(display = "se-NO"))]
    SamiNorthernNorway,
    #[strum(props(display = "se-SE"))]
    SamiNorthernSweden,
    #[strum(props(display = "sk-SK"))]
    Slovak,
    #[strum(props(display = "sk-SK"))]
    SlovakSlovakia,
    #[strum(props(display = "sl-SI"))]
    Slovenian,
    #[strum(props(display = "sl-SI"))]
    SlovenianSlovenia,
    #[strum(props(display = "sma-NO"))]
    SamiSouthernNorway,
    #[strum(props(display = "sma-SE"))]
    SamiSouthernSweden,
    #[strum(props(display = "smj-NO"))]
    SamiLuleNorway,
    #[strum(props(display = "smj-SE"))]
    SamiLuleSweden,
    #[strum(props(display = "smn-FI"))]
    SamiInariFinland,
    #[strum(props(display = "sms-FI"))]
    SamiSkoltFinland,
    #[strum(props(display = "sq-AL"))]
    Albanian,
    #[strum(props(display = "sq-AL"))]
    AlbanianAlbania,
    #[strum(props(display = "sr-Latn-CS"))]
    Serbian,
    #[strum(props(display = "sr-Cyrl-BA"))]
    SerbianCyrillicBosniaAndHerzegovina,
    #[strum(props(display = "sr-Cyrl-CS"))]
    SerbianCyrillicSerbia,
    #[strum(props(display = "sr-Latn-BA"))]
    SerbianLatinBosniaandHerzegovina,
    #[strum(props(display = "sr-Latn-CS"))]
    SerbianLatinSerbia,
    #[strum(props(display = "sv-SE"))]
    Swedish,
    #[strum(props(display = "sv-FI"))]
    SwedishFinland,
    #[strum(props(display = "sv-SE"))]
    SwedishSweden,
    #[strum(props(display = "sw-KE"))]
    Kiswahili,
    #[strum(props(display = "sw-KE"))]
    KiswahiliKenya,
    #[strum(props(display = "syr-SY"))]
    Syriac,
    #[strum(props(display = "syr-SY"))]
    SyriacSyria,
    #[strum(props(display = "ta-IN"))]
    Tamil,
    #[strum(props(display = "ta-IN"))]
    TamilIndia,
    #[strum(props(display = "te-IN"))]
    Telugu,
    #[strum(props(display = "te-IN"))]
    TeluguIndia,
    #[strum(props(display = "th-TH"))]
    Thai,
    #[strum(props(display = "th-TH"))]
    ThaiThailand,
    #[strum(props(display = "tn-ZA"))]
    TswanaSouthAfrica,
    #[strum(props(display = "tr-TR"))]
    Turkish,
    #[strum(props(display = "tr-TR"))]
    TurkishTurkey,
    #[strum(props(display = "tt-RU"))]
    Tatar,
    #[strum(props(display = "tt-RU"))]
    TatarRussia,
    #[strum(props(display = "uk-UA"))]
    Ukrainian,
    #[strum(props(display = "uk-UA"))]
    UkrainianUkraine,
    #[strum(props(display = "ur-PK"))]
    Urdu,
    #[strum(props(display = "ur-PK"))]
    UrduIslamicRepublicOfPakistan,
    #[strum(props(display = "uz-Latn-UZ"))]
    Uzbek,
    #[strum(props(display = "uz-Cyrl-UZ"))]
    UzbekCyrillicUzbekistan,
    #[strum(props(display = "uz-Latn-UZ"))]
    UzbekLatinUzbekistan,
    #[strum(props(display = "vi-VN"))]
    Vietnamese,
    #[strum(props(display = "vi-VN"))]
    VietnameseVietnam,
    #[strum(props(display = "xh-ZA"))]
    XhosaSouthAfrica,
    #[strum(props(display = "zh-Hans"))]
    ChineseSimplified,
    #[strum(props(display = "zh-Hant"))]
    ChineseTraditional,
    #[strum(props(display = "zh-CN"))]
    ChinesePeoplesRepublicOfChina,
    #[strum(props(display = "zh-HK"))]
    ChineseHongKongSAR,
    #[strum(props(display = "zh-MO"))]
    ChineseMacaoSAR,
    #[strum(props(display = "zh-SG"))]
    ChineseSingapore,
    #[strum(props(display = "zh-TW"))]
    ChineseTaiwan,
    #[strum(props(display = "zu-ZA"))]
    ZuluSouthAfrica,
}

impl Culture {
    /// The culture tag, e.g. `"en-US"`
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.get_str(DISPLAY_PROPERTY).unwrap_or_default()
    }

    /// The first culture carrying `tag`. Tags compare case-insensitively.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Culture> {
        Culture::iter().find(|culture| culture.tag().eq_ignore_ascii_case(tag))
    }

    /// All cultures in declaration order
    pub fn iter() -> CultureIter {
        <Culture as IntoEnumIterator>::iter()
    }
}

impl std::fmt::Display for Culture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, str::FromStr};

    use super::*;
    use crate::enums::DisplayString;

    #[test]
    fn test_tags() {
        assert_eq!(Culture::JapaneseJapan.tag(), "ja-JP");
        assert_eq!(Culture::EnglishUnitedStates.tag(), "en-US");
        assert_eq!(Culture::ChinesePeoplesRepublicOfChina.tag(), "zh-CN");
        assert_eq!(Culture::SerbianLatinSerbia.tag(), "sr-Latn-CS");
        assert_eq!(Culture::Afrikaans.tag(), Culture::AfrikaansSouthAfrica.tag());
        assert_eq!(Culture::GermanGermany.to_string(), "de-DE");
    }

    #[test]
    fn test_every_culture_has_a_stable_tag() {
        assert_eq!(Culture::COUNT, 225);
        for culture in Culture::iter() {
            let tag = culture.tag();
            assert!(!tag.is_empty(), "{culture:?}");
            assert_eq!(tag, culture.tag());
            assert_eq!(tag, culture.display_string());
        }
    }

    #[test]
    fn test_from_tag_returns_first_match() {
        assert_eq!(Culture::from_tag("af-ZA"), Some(Culture::Afrikaans));
        assert_eq!(Culture::from_tag("EN-us"), Some(Culture::English));
        assert_eq!(Culture::from_tag("xx-XX"), None);

        for culture in Culture::iter() {
            let first = Culture::from_tag(culture.tag()).unwrap();
            assert_eq!(first.tag(), culture.tag());
        }
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Culture::JapaneseJapan.as_ref(), "JapaneseJapan");
        assert_eq!(Culture::from_str("JapaneseJapan").unwrap(), Culture::JapaneseJapan);

        let names: HashSet<String> = Culture::iter().map(|culture| culture.as_ref().to_owned()).collect();
        assert_eq!(names.len(), Culture::COUNT);
    }
}
