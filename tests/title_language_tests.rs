use kariyer_pdf_server::generation::title::{cover_letter_filename, cv_filename, CoverLetterKind};
use kariyer_pdf_server::generation::{ascii_safe, detect, format_title, Language};

#[test]
fn test_format_title_drops_turkish_letters() {
    assert_eq!(format_title("  şirket   adı "), "Irket Ad");
}

#[test]
fn test_format_title_is_single_spaced() {
    let title = format_title("\tbackend\n\n developer  ");
    assert_eq!(title, "Backend Developer");
    assert!(!title.contains("  "));
}

#[test]
fn test_ascii_safe_is_idempotent() {
    for input in [
        "Şişecam Çözüm Ortağı",
        "  multiple   spaces  ",
        "R&D / Platform_Team",
        "İstanbul-Ğ",
        "",
    ] {
        let once = ascii_safe(input);
        assert_eq!(ascii_safe(&once), once, "input: {:?}", input);
        assert!(once.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}

#[test]
fn test_detect_turkish_stop_words() {
    assert_eq!(detect("ve bir için bu"), Language::Turkish);
}

#[test]
fn test_detect_english_stop_words() {
    assert_eq!(detect("and the for this"), Language::English);
}

#[test]
fn test_detect_empty_is_english() {
    assert_eq!(detect(""), Language::English);
    assert_eq!(detect("   \n "), Language::English);
}

#[test]
fn test_cover_letter_filenames() {
    assert_eq!(
        cover_letter_filename("türk telekom", "yazılım mühendisi", CoverLetterKind::Stored),
        "T_Rk_Telekom_Yaz_L_M_M_Hendisi_Cover_Letter.pdf"
    );
    assert_eq!(
        cover_letter_filename("Acme Corp", "engineer", CoverLetterKind::Edited),
        "Acme_Corp_Engineer_Edited_Cover_Letter.pdf"
    );
}

#[test]
fn test_cv_filename_uses_id() {
    assert_eq!(cv_filename(&"abc"), "cv-abc.pdf");
}
