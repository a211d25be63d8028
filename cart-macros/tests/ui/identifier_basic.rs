use cart_macros::identifier;

#[identifier]
pub struct SkuId(u64);

fn main() {
    let id = SkuId::new(7);
    assert_eq!(id.value(), 7);
    assert_eq!(id.to_string(), "7");
    assert_eq!(" 7 ".parse::<SkuId>().unwrap(), id);

    let raw: u64 = id.into();
    assert_eq!(SkuId::from(raw), id);

    // 序列化透明
    assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    let back: SkuId = serde_json::from_str("7").unwrap();
    assert!(back <= id);
}
