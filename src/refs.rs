use crate::metrics::FontId;
use pdf_writer::Ref;
use std::collections::HashMap;

/// Every kind of indirect object the PDF writer emits
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(FontId),
    CidFont(FontId),
    FontDescriptor(FontId),
    FontData(FontId),
    ToUnicode(FontId),
}

/// Hands out object ids in allocation order and remembers which object each one is for
pub struct ObjectRefs {
    refs: HashMap<RefType, Ref>,
    next: Ref,
}

impl ObjectRefs {
    pub fn new() -> ObjectRefs {
        ObjectRefs {
            refs: HashMap::new(),
            next: Ref::new(1),
        }
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// Allocate the id for `ref_type`, replacing any previous allocation
    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = self.next.bump();
        self.refs.insert(ref_type, id);
        id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ids_are_sequential_and_remembered() {
        let mut refs = ObjectRefs::new();
        let catalog = refs.gen(RefType::Catalog);
        let tree = refs.gen(RefType::PageTree);

        assert_eq!(catalog.get(), 1);
        assert_eq!(tree.get(), 2);
        assert_eq!(refs.get(RefType::PageTree), Some(tree));
        assert_eq!(refs.get(RefType::Page(0)), None);
    }
}
