use cart_macros::value_object;

#[value_object]
struct Discount {
    percent: u8,
}

#[value_object(ordered = true)]
struct Revision(u64);

#[value_object(debug = false, default = false)]
struct Label(String);

#[value_object]
enum Channel {
    #[default]
    Web,
    Kiosk,
}

fn main() {
    let _ = format!("{:?}", Discount { percent: 5 });
    let d = Discount::default();
    let _eq = d.clone() == Discount { percent: 0 };

    // ordered = true 派生 Copy/Ord/Hash
    let r = Revision(2);
    let copied = r;
    assert!(copied > Revision(1));
    let mut set = std::collections::HashSet::new();
    set.insert(r);

    let _ = Label("x".into()).clone();

    let c: Channel = Default::default();
    let _ = serde_json::to_string(&c).unwrap();
}
