macro_rules! selector {
    ($name:ident, $css:literal) => {
        static $name: std::sync::LazyLock<scraper::Selector> = std::sync::LazyLock::new(|| {
            scraper::Selector::parse($css).expect(concat!("invalid selector: ", $css))
        });
    };
}

pub mod diary;
pub mod lesson_times;
pub mod link;
pub mod profiles;
pub mod text;
