//! Keyword corpora - static keyword tables for industry detection and content fit
//!
//! Two independent tables live here:
//!
//! - the detector corpus: industry display name -> weighted keyword tiers,
//!   consumed by [`crate::industry`]
//! - the content-profile corpus: short classifier key -> expected-content
//!   checklist, consumed by [`crate::classify`], [`crate::personalization`]
//!   and [`crate::advice`]
//!
//! The key spaces are unrelated on purpose. A page may be detected as one
//! industry and classified under a different content profile.
//!
//! Every table is an ordered slice. Ranking ties are broken by this order, so
//! never move these into a hash map.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Sentinel key returned by the classifier when nothing matches
pub const UNKNOWN_KEY: &str = "unknown";

/// Keyword tiers for one detector-level industry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndustryKeywordProfile {
    /// Industry name, also used as the display label
    pub name: &'static str,
    /// Core vocabulary (weight 3)
    pub primary: &'static [&'static str],
    /// Adjacent vocabulary (weight 2)
    pub secondary: &'static [&'static str],
    /// Jargon that strongly identifies the industry (weight 5)
    pub specialized: &'static [&'static str],
}

/// Detector corpus in ranking-tie order
pub static INDUSTRY_PROFILES: &[IndustryKeywordProfile] = &[
    IndustryKeywordProfile {
        name: "IT・テクノロジー",
        primary: &["API", "SDK", "SaaS", "クラウド", "データベース", "システム開発", "ソフトウェア", "アプリ"],
        secondary: &["DX", "デジタル変革", "IT導入", "クラウド移行", "セキュリティ", "AI", "IoT"],
        specialized: &["React", "Python", "AWS", "Docker", "kubernetes", "GitHub", "DevOps"],
    },
    IndustryKeywordProfile {
        name: "医療・ヘルスケア",
        primary: &["診療", "治療", "医師", "看護師", "病院", "クリニック", "薬事法", "医療"],
        secondary: &["予防医療", "遠隔診療", "電子カルテ", "医療DX", "健康管理"],
        specialized: &["ICD-10", "レセプト", "診療報酬", "薬機法", "PMDA"],
    },
    IndustryKeywordProfile {
        name: "不動産",
        primary: &["物件", "賃貸", "売買", "マンション", "戸建て", "土地", "不動産投資"],
        secondary: &["リノベーション", "住宅ローン", "仲介手数料", "賃貸管理"],
        specialized: &["重要事項説明", "宅建士", "建ぺい率", "容積率", "登記"],
    },
    IndustryKeywordProfile {
        name: "教育・人材",
        primary: &["学習", "教育", "講座", "スクール", "研修", "資格", "eラーニング", "人材"],
        secondary: &["オンライン授業", "学習管理", "教材開発", "採用", "転職"],
        specialized: &["LMS", "アダプティブラーニング", "学習分析", "HRtech"],
    },
    IndustryKeywordProfile {
        name: "金融・保険",
        primary: &["融資", "投資", "保険", "資産運用", "金利", "リスク管理", "銀行"],
        secondary: &["フィンテック", "ロボアドバイザー", "仮想通貨", "決済"],
        specialized: &["AML", "KYC", "Basel III", "Solvency II", "PCI DSS"],
    },
    IndustryKeywordProfile {
        name: "製造業",
        primary: &["製造", "生産", "工場", "品質管理", "サプライチェーン", "設備"],
        secondary: &["IoT", "スマートファクトリー", "予知保全", "自動化"],
        specialized: &["QMS", "ISO9001", "TPM", "5S", "カイゼン", "JIT"],
    },
    IndustryKeywordProfile {
        name: "小売・EC",
        primary: &["商品", "販売", "店舗", "顧客", "在庫", "決済", "配送", "EC"],
        secondary: &["オムニチャネル", "CRM", "ポイント", "レコメンド"],
        specialized: &["SKU", "GMV", "LTV", "CAC", "CVR", "ROAS"],
    },
    IndustryKeywordProfile {
        name: "飲食・食品",
        primary: &["メニュー", "レストラン", "食材", "調理", "衛生管理", "栄養"],
        secondary: &["テイクアウト", "デリバリー", "食品ロス", "フードテック"],
        specialized: &["HACCP", "食品表示法", "トレーサビリティ"],
    },
    IndustryKeywordProfile {
        name: "建設・建築",
        primary: &["建設", "建築", "施工", "設計", "リフォーム", "住宅"],
        secondary: &["BIM", "建築DX", "省エネ", "耐震"],
        specialized: &["建築基準法", "一級建築士", "施工管理", "構造計算"],
    },
    IndustryKeywordProfile {
        name: "コンサルティング",
        primary: &["コンサル", "戦略", "業務改善", "経営", "支援"],
        secondary: &["DXコンサル", "ITコンサル", "人事コンサル"],
        specialized: &["フレームワーク", "ベストプラクティス", "KPI"],
    },
];

/// Audience categories and the raw substrings that reveal them.
///
/// Patterns are matched case-sensitively against the lowercased page text,
/// so the upper-case Latin entries only ever match text that was already
/// lower-case in that form.
pub static AUDIENCE_PATTERNS: &[(&str, &[&str])] = &[
    ("法人向け", &["企業", "会社", "法人", "ビジネス", "B2B"]),
    ("個人向け", &["個人", "家庭", "一般", "消費者", "B2C"]),
    ("専門職向け", &["医師", "弁護士", "税理士", "エンジニア", "専門家"]),
    ("経営者向け", &["経営者", "社長", "CEO", "役員", "管理職"]),
];

/// Regulations and standards worth flagging in a report
pub static REGULATORY_TERMS: &[&str] = &[
    "薬機法",
    "医療法",
    "金融商品取引法",
    "宅建業法",
    "建築基準法",
    "個人情報保護法",
    "食品衛生法",
    "労働基準法",
    "GDPR",
    "ISO",
];

/// Expected-content checklist for one content-profile key
#[derive(Debug, Clone, Serialize)]
pub struct ContentProfile {
    pub key: String,
    pub display_name: String,
    pub keywords: Vec<String>,
}

impl ContentProfile {
    pub fn new(key: &str, display_name: &str, keywords: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Insertion-ordered content-profile corpus
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentCorpus {
    profiles: Vec<ContentProfile>,
}

impl ContentCorpus {
    /// Build a corpus; a later profile with an existing key replaces the earlier one in place
    pub fn new(profiles: Vec<ContentProfile>) -> Self {
        let mut corpus = Self::default();
        for profile in profiles {
            corpus.insert(profile);
        }
        corpus
    }

    pub fn insert(&mut self, profile: ContentProfile) {
        match self.profiles.iter_mut().find(|p| p.key == profile.key) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Get profile by key
    pub fn get(&self, key: &str) -> Option<&ContentProfile> {
        self.profiles.iter().find(|p| p.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentProfile> {
        self.profiles.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Built-in content-profile corpus, shared read-only by every caller
pub static INDUSTRY_CONTENTS: Lazy<ContentCorpus> = Lazy::new(|| {
    ContentCorpus::new(vec![
        ContentProfile::new(
            "restaurant",
            "飲食店",
            &["メニュー", "予約", "アクセス", "営業時間", "地図", "価格"],
        ),
        ContentProfile::new(
            "real_estate",
            "不動産会社",
            &["物件情報", "間取り", "賃貸", "売買", "周辺環境", "お問い合わせ"],
        ),
        ContentProfile::new(
            "clinic",
            "クリニック",
            &["診療時間", "診療科目", "休診日", "医師紹介", "予約", "アクセス"],
        ),
        ContentProfile::new(
            "construction",
            "建設会社",
            &["施工事例", "対応エリア", "見積もり", "会社概要", "資格", "保証"],
        ),
        ContentProfile::new(UNKNOWN_KEY, "業種不明", &[]),
    ])
});

/// Signals the lightweight classifier counts for each content-profile key.
///
/// Kept separate from the checklists: a checklist describes what a good page
/// should contain, these describe what any page of the kind tends to mention.
pub static CLASSIFIER_SIGNALS: &[(&str, &[&str])] = &[
    (
        "restaurant",
        &["飲食", "レストラン", "メニュー", "料理", "ランチ", "ディナー", "カフェ", "居酒屋", "テイクアウト"],
    ),
    (
        "real_estate",
        &["不動産", "物件", "賃貸", "売買", "マンション", "戸建て", "土地", "間取り", "仲介"],
    ),
    (
        "clinic",
        &["クリニック", "診療", "医院", "病院", "内科", "歯科", "外来", "医師", "治療"],
    ),
    (
        "construction",
        &["建設", "工事", "施工", "リフォーム", "建築", "工務店", "土木", "外壁", "塗装"],
    ),
];
