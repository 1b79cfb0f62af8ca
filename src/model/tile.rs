use serde::{de, ser};

use super::*;

// [Suit]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Honor,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Man, Suit::Pin, Suit::Sou, Suit::Honor];
    pub const SUITED: [Suit; 3] = [Suit::Man, Suit::Pin, Suit::Sou];

    pub fn code(self) -> char {
        match self {
            Self::Man => 'm',
            Self::Pin => 'p',
            Self::Sou => 's',
            Self::Honor => 'z',
        }
    }

    pub fn from_code(c: char) -> Result<Self, String> {
        Ok(match c {
            'm' => Self::Man,
            'p' => Self::Pin,
            's' => Self::Sou,
            'z' => Self::Honor,
            _ => return Err(format!("invalid suit code: '{}'", c)),
        })
    }

    // 字牌は中(7)まで, 数牌は9まで
    pub fn max_rank(self) -> u8 {
        if self == Self::Honor {
            DR
        } else {
            9
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ser::Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut buf = [0; 4];
        serializer.serialize_str(self.code().encode_utf8(&mut buf))
    }
}

// [Notation]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Notation(pub Suit, pub u8); // (牌種, 番号) 番号0は赤5

impl Notation {
    pub fn from_symbol(s: &str) -> Result<Self, String> {
        let mut chars = s.chars();
        let rank = match chars.next() {
            Some(c @ '0'..='9') => c.to_digit(10).unwrap() as u8,
            _ => return Err(format!("invalid notation: '{}'", s)),
        };
        let suit = match chars.next() {
            Some(c) => Suit::from_code(c)?,
            None => return Err(format!("invalid notation: '{}'", s)),
        };
        if chars.next().is_some() {
            return Err(format!("invalid notation: '{}'", s));
        }

        let n = Self(suit, rank);
        if !n.is_valid() {
            return Err(format!("invalid notation: '{}'", s));
        }
        Ok(n)
    }

    // 字牌に赤は存在しない
    fn is_valid(self) -> bool {
        if self.1 == 0 {
            self.0 != Suit::Honor
        } else {
            self.1 <= self.0.max_rank()
        }
    }

    // 赤5の場合は通常の5を返却. それ以外の場合はコピーをそのまま返却.
    #[inline]
    pub fn to_normal(self) -> Self {
        if self.1 == 0 {
            Self(self.0, 5)
        } else {
            self
        }
    }

    #[inline]
    pub fn is_red(self) -> bool {
        self.1 == 0
    }

    #[inline]
    pub fn is_honor(self) -> bool {
        self.0 == Suit::Honor
    }

    pub fn unicode(self) -> char {
        const TABLE: [&str; 4] = [
            "🀋🀇🀈🀉🀊🀋🀌🀍🀎🀏",
            "🀝🀙🀚🀛🀜🀝🀞🀟🀠🀡",
            "🀔🀐🀑🀒🀓🀔🀕🀖🀗🀘",
            " 🀀🀁🀂🀃🀆🀅🀄",
        ];
        TABLE[self.0 as usize].chars().nth(self.1 as usize).unwrap()
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.1, self.0)
    }
}

impl fmt::Debug for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialOrd for Notation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Notation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 != other.0 {
            return self.0.cmp(&other.0);
        }

        // 赤5は4.5に変換して比較
        let a = if self.1 == 0 { 4.5 } else { self.1 as f32 };
        let b = if other.1 == 0 { 4.5 } else { other.1 as f32 };
        a.partial_cmp(&b).unwrap()
    }
}

impl ser::Serialize for Notation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct NotationVisitor;

impl<'de> de::Visitor<'de> for NotationVisitor {
    type Value = Notation;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile notation")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Notation::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Notation {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(NotationVisitor)
    }
}

// [TileTexture]
// アセット表のテクスチャIDと牌表記の組
// レジストリ構築時にのみ生成され, 以後は共有参照で受け渡す
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileTexture {
    texture_id: String,
    notation: Notation,
}

impl TileTexture {
    pub(crate) fn new(texture_id: String, notation: Notation) -> Self {
        Self {
            texture_id,
            notation,
        }
    }

    pub fn texture_id(&self) -> &str {
        &self.texture_id
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }
}

impl fmt::Display for TileTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.notation, self.texture_id)
    }
}

#[test]
fn test_notation_symbol() {
    let n = Notation::from_symbol("5m").unwrap();
    assert_eq!(n, Notation(Suit::Man, 5));
    assert_eq!(n.to_string(), "5m");

    let red = Notation::from_symbol("0p").unwrap();
    assert!(red.is_red());
    assert_eq!(red.to_normal(), Notation(Suit::Pin, 5));
    assert!(!red.is_honor());

    assert!(Notation::from_symbol("7z").unwrap().is_honor());
    assert!(Notation::from_symbol("0z").is_err());
    assert!(Notation::from_symbol("8z").is_err());
    assert!(Notation::from_symbol("5x").is_err());
    assert!(Notation::from_symbol("m5").is_err());
    assert!(Notation::from_symbol("55m").is_err());
}

#[test]
fn test_notation_order() {
    let mut v = vec![
        Notation::from_symbol("5m").unwrap(),
        Notation::from_symbol("0m").unwrap(),
        Notation::from_symbol("4m").unwrap(),
        Notation::from_symbol("1z").unwrap(),
        Notation::from_symbol("9s").unwrap(),
    ];
    v.sort();
    let syms: Vec<String> = v.iter().map(|n| n.to_string()).collect();
    assert_eq!(syms, ["4m", "0m", "5m", "9s", "1z"]);
}

#[test]
fn test_notation_serde() {
    let n: Notation = serde_json::from_str("\"0s\"").unwrap();
    assert_eq!(n, Notation(Suit::Sou, 0));
    assert_eq!(serde_json::to_string(&n).unwrap(), "\"0s\"");
    assert!(serde_json::from_str::<Notation>("\"9z\"").is_err());
}
