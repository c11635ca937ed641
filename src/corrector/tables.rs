use phf::phf_map;

/// Misspellings seen often enough in signup data to hardcode. Keys and
/// values are lowercase; keys must never appear in [`TRUSTED_DOMAINS`].
pub(crate) const KNOWN_TYPOS: phf::Map<&'static str, &'static str> = phf_map! {
    // gmail
    "gmai.com" => "gmail.com",
    "gmial.com" => "gmail.com",
    "gamil.com" => "gmail.com",
    "gmali.com" => "gmail.com",
    "gmaill.com" => "gmail.com",
    "gnail.com" => "gmail.com",
    "gemail.com" => "gmail.com",
    "gmail.co" => "gmail.com",
    "gmail.cm" => "gmail.com",
    // yahoo
    "yaho.com" => "yahoo.com",
    "yahooo.com" => "yahoo.com",
    "yhaoo.com" => "yahoo.com",
    "yaoo.com" => "yahoo.com",
    "yahoo.co" => "yahoo.com",
    // hotmail
    "hotmial.com" => "hotmail.com",
    "hotmai.com" => "hotmail.com",
    "hotmal.com" => "hotmail.com",
    "hotamil.com" => "hotmail.com",
    "hormail.com" => "hotmail.com",
    "hotmail.co" => "hotmail.com",
    // outlook
    "outlok.com" => "outlook.com",
    "oulook.com" => "outlook.com",
    "outloook.com" => "outlook.com",
    "outlook.co" => "outlook.com",
    // icloud
    "iclod.com" => "icloud.com",
    "icloud.co" => "icloud.com",
    "icoud.com" => "icloud.com",
    // proton
    "protonmai.com" => "protonmail.com",
    "protonmial.com" => "protonmail.com",
};

/// Malformed final labels and the TLD they almost certainly meant.
/// Real ccTLDs ("co", "cm", ...) are deliberately absent: only strings
/// that are not TLDs at all qualify. Whole-domain typosquats like
/// "gmail.cm" belong in [`KNOWN_TYPOS`] instead.
pub(crate) const TLD_REPAIRS: phf::Map<&'static str, &'static str> = phf_map! {
    "con" => "com",
    "cmo" => "com",
    "ocm" => "com",
    "comm" => "com",
    "coom" => "com",
    "vom" => "com",
    "xom" => "com",
    "nett" => "net",
    "ner" => "net",
    "ogr" => "org",
    "orgg" => "org",
};

/// Curated high-traffic mail domains used as similarity targets.
///
/// Iteration order is the tie-break order: when two entries sit at the
/// same edit distance from the input, the earlier one wins. Keep the
/// biggest providers first.
pub(crate) const TRUSTED_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
    "aol.com",
    "protonmail.com",
    "proton.me",
    "live.com",
    "msn.com",
    "me.com",
    "googlemail.com",
    "ymail.com",
    "zoho.com",
    "yandex.com",
    "fastmail.com",
    "tutanota.com",
    "hey.com",
    "mail.com",
    "gmx.com",
    "gmx.de",
    "web.de",
    "orange.fr",
    "free.fr",
    "laposte.net",
    "qq.com",
    "163.com",
    "126.com",
    "naver.com",
    "comcast.net",
    "verizon.net",
    "att.net",
    "btinternet.com",
    "sky.com",
];
