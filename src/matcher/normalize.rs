use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strips diacritics: `"Gaëtan Müller"` -> `"Gaetan Muller"`.
pub fn fold_accents(input: &str) -> String {
    input.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lower-cased, accent-free name tokens used for name agreement.
pub fn name_tokens(display_name: &str) -> Vec<String> {
    fold_accents(&display_name.replace('_', " "))
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Target filename stem for an imported track: `"Jean-Luc D'Arc"` -> `"jean-luc_d_arc"`.
pub fn target_filename(display_name: &str) -> String {
    let spaced = display_name.replace(['_', '\''], " ");
    let folded = fold_accents(&spaced).to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join("_")
}
