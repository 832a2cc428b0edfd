symbol_table! {
    /// Stanford basic dependency relations.
    DependencyLabel {
        Root => "root",
        Dep => "dep",
        Nsubj => "nsubj",
        Nsubjpass => "nsubjpass",
        Csubj => "csubj",
        Csubjpass => "csubjpass",
        Dobj => "dobj",
        Iobj => "iobj",
        Pobj => "pobj",
        Pcomp => "pcomp",
        Attr => "attr",
        Ccomp => "ccomp",
        Xcomp => "xcomp",
        Rel => "rel",
        Expl => "expl",
        Acomp => "acomp",
        Advcl => "advcl",
        Rcmod => "rcmod",
        Mark => "mark",
        Amod => "amod",
        Aux => "aux",
        Cop => "cop",
        Conj => "conj",
        Cc => "cc",
        Punct => "punct",
    }
}
