//! # クエリパラメータの取り出し
//!
//! 同じキーが複数回指定された場合は最初の値を採用する。
//! `serde` の構造体デシリアライズは重複キーをエラーにするため、
//! ハンドラはキーと値の組の列として受け取り、ここで必要なキーを探す。

/// クエリ文字列をデコードしたキーと値の組
pub type QueryPairs = Vec<(String, String)>;

/// `key` に対応する最初の値を返す
pub fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
   pairs
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
}
