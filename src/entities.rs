//! The named character entity table.
//!
//! Covers the HTML 4.01 entity set (Latin-1, symbols, Greek, general
//! punctuation) plus the five XML built-ins. Lookup is exact-case:
//! `Agrave` and `agrave` are different entities.

/// Resolves a named entity to its character, or `None` when the name is
/// not in the table. The name excludes the surrounding `&` and `;`.
pub const fn get(name: &str) -> Option<char> {
    let c = match name.as_bytes() {
        // XML built-ins
        b"quot" => '"',
        b"amp" => '&',
        b"apos" => '\'',
        b"lt" => '<',
        b"gt" => '>',

        // Latin-1
        b"nbsp" => '\u{A0}',
        b"iexcl" => '\u{A1}',
        b"cent" => '\u{A2}',
        b"pound" => '\u{A3}',
        b"curren" => '\u{A4}',
        b"yen" => '\u{A5}',
        b"brvbar" => '\u{A6}',
        b"sect" => '\u{A7}',
        b"uml" => '\u{A8}',
        b"copy" => '\u{A9}',
        b"ordf" => '\u{AA}',
        b"laquo" => '\u{AB}',
        b"not" => '\u{AC}',
        b"shy" => '\u{AD}',
        b"reg" => '\u{AE}',
        b"macr" => '\u{AF}',
        b"deg" => '\u{B0}',
        b"plusmn" => '\u{B1}',
        b"sup2" => '\u{B2}',
        b"sup3" => '\u{B3}',
        b"acute" => '\u{B4}',
        b"micro" => '\u{B5}',
        b"para" => '\u{B6}',
        b"middot" => '\u{B7}',
        b"cedil" => '\u{B8}',
        b"sup1" => '\u{B9}',
        b"ordm" => '\u{BA}',
        b"raquo" => '\u{BB}',
        b"frac14" => '\u{BC}',
        b"frac12" => '\u{BD}',
        b"frac34" => '\u{BE}',
        b"iquest" => '\u{BF}',
        b"Agrave" => '\u{C0}',
        b"Aacute" => '\u{C1}',
        b"Acirc" => '\u{C2}',
        b"Atilde" => '\u{C3}',
        b"Auml" => '\u{C4}',
        b"Aring" => '\u{C5}',
        b"AElig" => '\u{C6}',
        b"Ccedil" => '\u{C7}',
        b"Egrave" => '\u{C8}',
        b"Eacute" => '\u{C9}',
        b"Ecirc" => '\u{CA}',
        b"Euml" => '\u{CB}',
        b"Igrave" => '\u{CC}',
        b"Iacute" => '\u{CD}',
        b"Icirc" => '\u{CE}',
        b"Iuml" => '\u{CF}',
        b"ETH" => '\u{D0}',
        b"Ntilde" => '\u{D1}',
        b"Ograve" => '\u{D2}',
        b"Oacute" => '\u{D3}',
        b"Ocirc" => '\u{D4}',
        b"Otilde" => '\u{D5}',
        b"Ouml" => '\u{D6}',
        b"times" => '\u{D7}',
        b"Oslash" => '\u{D8}',
        b"Ugrave" => '\u{D9}',
        b"Uacute" => '\u{DA}',
        b"Ucirc" => '\u{DB}',
        b"Uuml" => '\u{DC}',
        b"Yacute" => '\u{DD}',
        b"THORN" => '\u{DE}',
        b"szlig" => '\u{DF}',
        b"agrave" => '\u{E0}',
        b"aacute" => '\u{E1}',
        b"acirc" => '\u{E2}',
        b"atilde" => '\u{E3}',
        b"auml" => '\u{E4}',
        b"aring" => '\u{E5}',
        b"aelig" => '\u{E6}',
        b"ccedil" => '\u{E7}',
        b"egrave" => '\u{E8}',
        b"eacute" => '\u{E9}',
        b"ecirc" => '\u{EA}',
        b"euml" => '\u{EB}',
        b"igrave" => '\u{EC}',
        b"iacute" => '\u{ED}',
        b"icirc" => '\u{EE}',
        b"iuml" => '\u{EF}',
        b"eth" => '\u{F0}',
        b"ntilde" => '\u{F1}',
        b"ograve" => '\u{F2}',
        b"oacute" => '\u{F3}',
        b"ocirc" => '\u{F4}',
        b"otilde" => '\u{F5}',
        b"ouml" => '\u{F6}',
        b"divide" => '\u{F7}',
        b"oslash" => '\u{F8}',
        b"ugrave" => '\u{F9}',
        b"uacute" => '\u{FA}',
        b"ucirc" => '\u{FB}',
        b"uuml" => '\u{FC}',
        b"yacute" => '\u{FD}',
        b"thorn" => '\u{FE}',
        b"yuml" => '\u{FF}',

        // Latin Extended and spacing modifiers
        b"OElig" => '\u{152}',
        b"oelig" => '\u{153}',
        b"Scaron" => '\u{160}',
        b"scaron" => '\u{161}',
        b"Yuml" => '\u{178}',
        b"fnof" => '\u{192}',
        b"circ" => '\u{2C6}',
        b"tilde" => '\u{2DC}',

        // Greek
        b"Alpha" => '\u{391}',
        b"Beta" => '\u{392}',
        b"Gamma" => '\u{393}',
        b"Delta" => '\u{394}',
        b"Epsilon" => '\u{395}',
        b"Zeta" => '\u{396}',
        b"Eta" => '\u{397}',
        b"Theta" => '\u{398}',
        b"Iota" => '\u{399}',
        b"Kappa" => '\u{39A}',
        b"Lambda" => '\u{39B}',
        b"Mu" => '\u{39C}',
        b"Nu" => '\u{39D}',
        b"Xi" => '\u{39E}',
        b"Omicron" => '\u{39F}',
        b"Pi" => '\u{3A0}',
        b"Rho" => '\u{3A1}',
        b"Sigma" => '\u{3A3}',
        b"Tau" => '\u{3A4}',
        b"Upsilon" => '\u{3A5}',
        b"Phi" => '\u{3A6}',
        b"Chi" => '\u{3A7}',
        b"Psi" => '\u{3A8}',
        b"Omega" => '\u{3A9}',
        b"alpha" => '\u{3B1}',
        b"beta" => '\u{3B2}',
        b"gamma" => '\u{3B3}',
        b"delta" => '\u{3B4}',
        b"epsilon" => '\u{3B5}',
        b"zeta" => '\u{3B6}',
        b"eta" => '\u{3B7}',
        b"theta" => '\u{3B8}',
        b"iota" => '\u{3B9}',
        b"kappa" => '\u{3BA}',
        b"lambda" => '\u{3BB}',
        b"mu" => '\u{3BC}',
        b"nu" => '\u{3BD}',
        b"xi" => '\u{3BE}',
        b"omicron" => '\u{3BF}',
        b"pi" => '\u{3C0}',
        b"rho" => '\u{3C1}',
        b"sigmaf" => '\u{3C2}',
        b"sigma" => '\u{3C3}',
        b"tau" => '\u{3C4}',
        b"upsilon" => '\u{3C5}',
        b"phi" => '\u{3C6}',
        b"chi" => '\u{3C7}',
        b"psi" => '\u{3C8}',
        b"omega" => '\u{3C9}',
        b"thetasym" => '\u{3D1}',
        b"upsih" => '\u{3D2}',
        b"piv" => '\u{3D6}',

        // general punctuation
        b"ensp" => '\u{2002}',
        b"emsp" => '\u{2003}',
        b"thinsp" => '\u{2009}',
        b"zwnj" => '\u{200C}',
        b"zwj" => '\u{200D}',
        b"lrm" => '\u{200E}',
        b"rlm" => '\u{200F}',
        b"ndash" => '\u{2013}',
        b"mdash" => '\u{2014}',
        b"lsquo" => '\u{2018}',
        b"rsquo" => '\u{2019}',
        b"sbquo" => '\u{201A}',
        b"ldquo" => '\u{201C}',
        b"rdquo" => '\u{201D}',
        b"bdquo" => '\u{201E}',
        b"dagger" => '\u{2020}',
        b"Dagger" => '\u{2021}',
        b"bull" => '\u{2022}',
        b"hellip" => '\u{2026}',
        b"permil" => '\u{2030}',
        b"prime" => '\u{2032}',
        b"Prime" => '\u{2033}',
        b"lsaquo" => '\u{2039}',
        b"rsaquo" => '\u{203A}',
        b"oline" => '\u{203E}',
        b"frasl" => '\u{2044}',
        b"euro" => '\u{20AC}',

        // letterlike symbols and arrows
        b"image" => '\u{2111}',
        b"weierp" => '\u{2118}',
        b"real" => '\u{211C}',
        b"trade" => '\u{2122}',
        b"alefsym" => '\u{2135}',
        b"larr" => '\u{2190}',
        b"uarr" => '\u{2191}',
        b"rarr" => '\u{2192}',
        b"darr" => '\u{2193}',
        b"harr" => '\u{2194}',
        b"crarr" => '\u{21B5}',
        b"lArr" => '\u{21D0}',
        b"uArr" => '\u{21D1}',
        b"rArr" => '\u{21D2}',
        b"dArr" => '\u{21D3}',
        b"hArr" => '\u{21D4}',

        // mathematical operators
        b"forall" => '\u{2200}',
        b"part" => '\u{2202}',
        b"exist" => '\u{2203}',
        b"empty" => '\u{2205}',
        b"nabla" => '\u{2207}',
        b"isin" => '\u{2208}',
        b"notin" => '\u{2209}',
        b"ni" => '\u{220B}',
        b"prod" => '\u{220F}',
        b"sum" => '\u{2211}',
        b"minus" => '\u{2212}',
        b"lowast" => '\u{2217}',
        b"radic" => '\u{221A}',
        b"prop" => '\u{221D}',
        b"infin" => '\u{221E}',
        b"ang" => '\u{2220}',
        b"and" => '\u{2227}',
        b"or" => '\u{2228}',
        b"cap" => '\u{2229}',
        b"cup" => '\u{222A}',
        b"int" => '\u{222B}',
        b"there4" => '\u{2234}',
        b"sim" => '\u{223C}',
        b"cong" => '\u{2245}',
        b"asymp" => '\u{2248}',
        b"ne" => '\u{2260}',
        b"equiv" => '\u{2261}',
        b"le" => '\u{2264}',
        b"ge" => '\u{2265}',
        b"sub" => '\u{2282}',
        b"sup" => '\u{2283}',
        b"nsub" => '\u{2284}',
        b"sube" => '\u{2286}',
        b"supe" => '\u{2287}',
        b"oplus" => '\u{2295}',
        b"otimes" => '\u{2297}',
        b"perp" => '\u{22A5}',
        b"sdot" => '\u{22C5}',

        // technical and geometric shapes
        b"lceil" => '\u{2308}',
        b"rceil" => '\u{2309}',
        b"lfloor" => '\u{230A}',
        b"rfloor" => '\u{230B}',
        b"lang" => '\u{2329}',
        b"rang" => '\u{232A}',
        b"loz" => '\u{25CA}',
        b"spades" => '\u{2660}',
        b"clubs" => '\u{2663}',
        b"hearts" => '\u{2665}',
        b"diams" => '\u{2666}',

        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtins() {
        assert_eq!(get("lt"), Some('<'));
        assert_eq!(get("gt"), Some('>'));
        assert_eq!(get("amp"), Some('&'));
        assert_eq!(get("quot"), Some('"'));
        assert_eq!(get("apos"), Some('\''));
    }

    #[test]
    fn case_matters() {
        assert_eq!(get("Agrave"), Some('À'));
        assert_eq!(get("agrave"), Some('à'));
        assert_eq!(get("AGRAVE"), None);
    }

    #[test]
    fn symbols() {
        assert_eq!(get("nbsp"), Some('\u{A0}'));
        assert_eq!(get("eacute"), Some('é'));
        assert_eq!(get("euro"), Some('€'));
        assert_eq!(get("rarr"), Some('→'));
        assert_eq!(get("Omega"), Some('Ω'));
        assert_eq!(get("sigmaf"), Some('ς'));
    }

    #[test]
    fn unknown_names() {
        assert_eq!(get("nosuch"), None);
        assert_eq!(get(""), None);
        assert_eq!(get("#38"), None);
    }
}
