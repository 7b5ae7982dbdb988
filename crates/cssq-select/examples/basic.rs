//! Example: Basic selector queries over a small catalog

use cssq_dom::DomTree;
use cssq_select::{Finder, select};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut dom = DomTree::new();
    let root = dom.root();
    let catalog = [("a", "Empire Burlesque"), ("", "Hide your heart")];
    let collection = dom.append_element(root, "collection", &[])?;
    for (class, title) in catalog {
        let cd = dom.append_element(collection, "cd", &[("class", class)])?;
        let node = dom.append_element(cd, "title", &[])?;
        dom.append_text(node, title)?;
    }

    let mut finder = Finder::new(&dom);
    finder.find("cd.a")?;
    println!("cd.a -> {} node(s)", finder.matches().len());

    for title in Finder::from_nodes(&dom, [collection])?.find("cd title")?.matches() {
        println!("title: {}", dom.text_content(title));
    }

    let all = select(&dom, "title, cd")?;
    println!("title, cd -> {} node(s)", all.len());

    if let Err(err) = select(&dom, "cd >") {
        println!("error: {err}");
    }
    Ok(())
}
