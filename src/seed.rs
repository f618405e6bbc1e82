//! Demo data for local development.

use chrono::NaiveDate;

use crate::models::{Category, NewTournament, TournamentStatus};
use crate::store::{StoreError, TournamentStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // All literals below are valid calendar dates.
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

struct SeedRow {
    name: &'static str,
    description: &'static str,
    start: NaiveDate,
    end: NaiveDate,
    prefecture: &'static str,
    city: &'static str,
    venue: &'static str,
    category: Category,
    level: &'static str,
    entry_fee: u32,
    max_entries: u32,
    deadline: NaiveDate,
    contact_info: &'static str,
    source_url: &'static str,
    status: TournamentStatus,
}

impl SeedRow {
    fn into_record(self) -> NewTournament {
        NewTournament {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            start_date: self.start,
            end_date: Some(self.end),
            prefecture: self.prefecture.to_string(),
            city: Some(self.city.to_string()),
            venue: Some(self.venue.to_string()),
            category: self.category,
            level: Some(self.level.to_string()),
            entry_fee: Some(self.entry_fee),
            max_entries: Some(self.max_entries),
            deadline: Some(self.deadline),
            contact_info: Some(self.contact_info.to_string()),
            source_url: Some(self.source_url.to_string()),
            status: self.status,
        }
    }
}

fn rows() -> Vec<SeedRow> {
    vec![
        SeedRow {
            name: "第45回全日本バドミントン選手権大会",
            description: "全国から強豪選手が集結する最高峰の大会です。",
            start: date(2026, 12, 15),
            end: date(2026, 12, 17),
            prefecture: "東京都",
            city: "調布市",
            venue: "武蔵野の森総合スポーツプラザ",
            category: Category::General,
            level: "全国大会",
            entry_fee: 5000,
            max_entries: 256,
            deadline: date(2026, 11, 30),
            contact_info: "日本バドミントン協会 03-1234-5678",
            source_url: "https://www.badminton.or.jp/tournament/test",
            status: TournamentStatus::Published,
        },
        SeedRow {
            name: "神奈川県バドミントン選手権大会",
            description: "神奈川県内最大規模のバドミントン大会です。",
            start: date(2026, 11, 20),
            end: date(2026, 11, 21),
            prefecture: "神奈川県",
            city: "横浜市",
            venue: "横浜文化体育館",
            category: Category::General,
            level: "県大会",
            entry_fee: 3000,
            max_entries: 128,
            deadline: date(2026, 11, 10),
            contact_info: "神奈川県バドミントン協会",
            source_url: "https://kanagawa-badminton.jp/tournament/test",
            status: TournamentStatus::Published,
        },
        SeedRow {
            name: "関東学生バドミントン選手権大会",
            description: "関東地区の大学生による熱戦が繰り広げられます。",
            start: date(2026, 10, 25),
            end: date(2026, 10, 27),
            prefecture: "埼玉県",
            city: "さいたま市",
            venue: "さいたまスーパーアリーナ",
            category: Category::Student,
            level: "地区大会",
            entry_fee: 2000,
            max_entries: 200,
            deadline: date(2026, 10, 15),
            contact_info: "関東学生バドミントン連盟",
            source_url: "https://kanto-student-badminton.jp/tournament/test",
            status: TournamentStatus::Published,
        },
        SeedRow {
            name: "大阪府シニアバドミントン大会",
            description: "40歳以上の方が対象のシニア大会です。",
            start: date(2026, 12, 1),
            end: date(2026, 12, 1),
            prefecture: "大阪府",
            city: "大阪市",
            venue: "大阪府立体育会館",
            category: Category::Senior,
            level: "府大会",
            entry_fee: 2500,
            max_entries: 64,
            deadline: date(2026, 11, 20),
            contact_info: "大阪府バドミントン協会",
            source_url: "https://osaka-badminton.jp/tournament/test",
            status: TournamentStatus::Published,
        },
        SeedRow {
            name: "千葉県高等学校バドミントン新人大会",
            description: "千葉県内の高校生による新人戦です。",
            start: date(2026, 11, 8),
            end: date(2026, 11, 9),
            prefecture: "千葉県",
            city: "千葉市",
            venue: "千葉ポートアリーナ",
            category: Category::HighSchool,
            level: "県大会",
            entry_fee: 1500,
            max_entries: 180,
            deadline: date(2026, 10, 25),
            contact_info: "千葉県高等学校体育連盟バドミントン部",
            source_url: "https://chiba-highschool-badminton.jp/tournament/test",
            status: TournamentStatus::Published,
        },
        SeedRow {
            name: "北海道バドミントン選手権大会",
            description: "雪国北海道の熱いバドミントン大会です。",
            start: date(2026, 11, 30),
            end: date(2026, 12, 1),
            prefecture: "北海道",
            city: "札幌市",
            venue: "北海きたえーる",
            category: Category::General,
            level: "道大会",
            entry_fee: 3500,
            max_entries: 120,
            deadline: date(2026, 11, 15),
            contact_info: "北海道バドミントン協会",
            source_url: "https://hokkaido-badminton.jp/tournament/test",
            status: TournamentStatus::Published,
        },
        SeedRow {
            name: "福岡県実業団バドミントン選手権大会",
            description: "九州地区の実業団チームが参加する大会です。",
            start: date(2026, 12, 8),
            end: date(2026, 12, 8),
            prefecture: "福岡県",
            city: "福岡市",
            venue: "福岡市民体育館",
            category: Category::Corporate,
            level: "県大会",
            entry_fee: 4000,
            max_entries: 32,
            deadline: date(2026, 11, 25),
            contact_info: "福岡県実業団バドミントン連盟",
            source_url: "https://fukuoka-jitsugyodan-badminton.jp/tournament/test",
            status: TournamentStatus::Published,
        },
        SeedRow {
            name: "愛知県中学生バドミントン選手権大会",
            description: "愛知県内の中学生が参加する選手権大会です。",
            start: date(2026, 11, 16),
            end: date(2026, 11, 17),
            prefecture: "愛知県",
            city: "名古屋市",
            venue: "名古屋市総合体育館",
            category: Category::JuniorHigh,
            level: "県大会",
            entry_fee: 1000,
            max_entries: 150,
            deadline: date(2026, 11, 5),
            contact_info: "愛知県中学校体育連盟バドミントン部",
            source_url: "https://aichi-junior-badminton.jp/tournament/test",
            status: TournamentStatus::Published,
        },
        // Draft record: must never surface through the query engine.
        SeedRow {
            name: "京都府バドミントン大会（準備中）",
            description: "詳細調整中のため未公開です。",
            start: date(2027, 1, 10),
            end: date(2027, 1, 10),
            prefecture: "京都府",
            city: "京都市",
            venue: "京都市体育館",
            category: Category::General,
            level: "府大会",
            entry_fee: 2000,
            max_entries: 96,
            deadline: date(2026, 12, 20),
            contact_info: "京都府バドミントン協会",
            source_url: "https://kyoto-badminton.jp/tournament/test",
            status: TournamentStatus::Draft,
        },
    ]
}

/// Insert the demo tournaments, returning how many were created.
pub async fn seed(store: &dyn TournamentStore) -> Result<usize, StoreError> {
    let mut created = 0;
    for row in rows() {
        store.create(row.into_record()).await?;
        created += 1;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchQuery;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn seeds_nine_records_with_one_draft_hidden() {
        let store = MemoryStore::new();
        let created = seed(&store).await.unwrap();
        assert_eq!(created, 9);

        let visible = store
            .count(&SearchQuery {
                page: 1,
                limit: 20,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(visible, 8);
    }
}
