//! Comprehensive tests for cssq-select
//!
//! End-to-end queries against `cssq_dom` trees.

use cssq_dom::{DomTree, NodeId};
use cssq_select::{CombinatorMode, Finder, MatchOptions, MatchSet, StructuralPseudo, select};

struct Collection {
    dom: DomTree,
    collection: NodeId,
    cd1: NodeId,
    title1: NodeId,
    cd2: NodeId,
    title2: NodeId,
}

/// `<collection><cd class="a"><title>T1</title></cd><cd><title>T2</title></cd></collection>`
fn collection() -> anyhow::Result<Collection> {
    let mut dom = DomTree::new();
    let root = dom.root();
    let collection = dom.append_element(root, "collection", &[])?;
    let cd1 = dom.append_element(collection, "cd", &[("class", "a")])?;
    let title1 = dom.append_element(cd1, "title", &[])?;
    dom.append_text(title1, "T1")?;
    let cd2 = dom.append_element(collection, "cd", &[])?;
    let title2 = dom.append_element(cd2, "title", &[])?;
    dom.append_text(title2, "T2")?;
    Ok(Collection {
        dom,
        collection,
        cd1,
        title1,
        cd2,
        title2,
    })
}

#[test]
fn test_class_query_from_root() -> anyhow::Result<()> {
    let c = collection()?;
    let mut finder = Finder::new(&c.dom);
    finder.find("cd.a")?;
    assert_eq!(finder.matches().as_slice(), &[c.cd1]);
    Ok(())
}

#[test]
fn test_descendant_query_from_collection() -> anyhow::Result<()> {
    let c = collection()?;
    let mut finder = Finder::from_nodes(&c.dom, [c.collection])?;
    finder.find("cd title")?;
    assert_eq!(finder.matches().as_slice(), &[c.title1, c.title2]);

    let titles: Vec<String> = finder
        .matches()
        .iter()
        .map(|n| c.dom.text_content(n))
        .collect();
    assert_eq!(titles, ["T1", "T2"]);
    Ok(())
}

#[test]
fn test_selector_list_has_no_duplicates() -> anyhow::Result<()> {
    let c = collection()?;
    let found = select(&c.dom, "title, cd")?;
    assert_eq!(found.len(), 4);
    let expected: MatchSet<NodeId> = [c.cd1, c.cd2, c.title1, c.title2].into_iter().collect();
    assert_eq!(found, expected);

    let overlapping = select(&c.dom, "cd title, title, collection title")?;
    assert_eq!(overlapping.as_slice(), &[c.title1, c.title2]);
    Ok(())
}

#[test]
fn test_find_is_idempotent() -> anyhow::Result<()> {
    let c = collection()?;
    let mut once = Finder::new(&c.dom);
    once.find("cd title")?;

    let mut twice = Finder::new(&c.dom);
    twice.find("cd title")?.find("cd title")?;
    assert_eq!(once.matches(), twice.matches());
    Ok(())
}

#[test]
fn test_more_classes_never_widen() -> anyhow::Result<()> {
    let mut dom = DomTree::new();
    let root = dom.root();
    let list = dom.append_element(root, "list", &[])?;
    for class in ["a", "a b", "b", "a b c", "c a"] {
        dom.append_element(list, "item", &[("class", class)])?;
    }

    let a = select(&dom, "item.a")?;
    let ab = select(&dom, "item.a.b")?;
    let abc = select(&dom, "item.a.b.c")?;
    assert_eq!((a.len(), ab.len(), abc.len()), (4, 2, 1));
    assert!(ab.iter().all(|n| a.contains(n)));
    assert!(abc.iter().all(|n| ab.contains(n)));
    Ok(())
}

#[test]
fn test_chained_finds_narrow() -> anyhow::Result<()> {
    let c = collection()?;
    let mut finder = Finder::new(&c.dom);
    finder.find("cd")?;
    let before = finder.matches().clone();
    finder.find(".a")?;
    assert!(finder.matches().iter().all(|n| before.contains(n)));
    assert_eq!(finder.matches().as_slice(), &[c.cd1]);

    let inner = finder.within("title")?;
    assert_eq!(inner.matches().as_slice(), &[c.title1]);
    Ok(())
}

#[test]
fn test_strict_and_compat_combinators() -> anyhow::Result<()> {
    let c = collection()?;
    assert!(select(&c.dom, "collection > title")?.is_empty());
    assert_eq!(select(&c.dom, "collection > cd > title")?.len(), 2);
    assert_eq!(select(&c.dom, "cd + cd")?.as_slice(), &[c.cd2]);
    assert_eq!(select(&c.dom, "cd.a ~ *")?.as_slice(), &[c.cd2]);

    let mut compat = Finder::new(&c.dom).with_options(MatchOptions {
        combinators: CombinatorMode::Compat,
        ..MatchOptions::default()
    });
    compat.find("collection > title")?;
    assert_eq!(compat.matches().as_slice(), &[c.title1, c.title2]);
    Ok(())
}

#[test]
fn test_attribute_operators_on_dom() -> anyhow::Result<()> {
    let mut dom = DomTree::new();
    let root = dom.root();
    let body = dom.append_element(root, "body", &[])?;
    let en = dom.append_element(body, "p", &[("lang", "en-US"), ("title", "hello world")])?;
    let fr = dom.append_element(body, "p", &[("lang", "fr"), ("title", "bonjour")])?;
    let bare = dom.append_element(body, "p", &[])?;

    assert_eq!(select(&dom, "p[lang]")?.as_slice(), &[en, fr]);
    assert_eq!(select(&dom, "p[lang|=en]")?.as_slice(), &[en]);
    assert_eq!(select(&dom, "p[lang|=US]")?.as_slice(), &[en]);
    assert_eq!(select(&dom, "p[title~=world]")?.as_slice(), &[en]);
    assert_eq!(select(&dom, "p[title*=jour]")?.as_slice(), &[fr]);
    assert_eq!(select(&dom, r#"p[title^="hello "]"#)?.as_slice(), &[en]);
    assert_eq!(select(&dom, "p[title$=jour]")?.as_slice(), &[fr]);
    assert_eq!(select(&dom, "p[lang=fr]")?.as_slice(), &[fr]);
    assert!(select(&dom, "p[title^=\"\"]")?.is_empty());
    assert!(select(&dom, "p")?.contains(bare));
    Ok(())
}

#[test]
fn test_pseudo_policies() -> anyhow::Result<()> {
    let c = collection()?;
    // default policy ignores pseudo predicates
    assert_eq!(select(&c.dom, "cd:first-child")?.len(), 2);
    assert_eq!(select(&c.dom, "title::before")?.len(), 2);

    let mut finder = Finder::new(&c.dom).with_pseudo(StructuralPseudo);
    finder.find("cd:first-child title")?;
    assert_eq!(finder.matches().as_slice(), &[c.title1]);

    let mut root = Finder::new(&c.dom).with_pseudo(StructuralPseudo);
    root.find(":root")?;
    assert_eq!(root.matches().as_slice(), &[c.collection]);
    Ok(())
}

#[test]
fn test_id_selector() -> anyhow::Result<()> {
    let mut dom = DomTree::new();
    let root = dom.root();
    let main = dom.append_element(root, "main", &[("id", "content")])?;
    let section = dom.append_element(main, "section", &[("id", "intro")])?;

    assert_eq!(select(&dom, "#content")?.as_slice(), &[main]);
    assert_eq!(select(&dom, "#content > section#intro")?.as_slice(), &[section]);
    assert!(select(&dom, "section#content")?.is_empty());
    Ok(())
}
