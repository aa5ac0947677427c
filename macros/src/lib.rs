extern crate proc_macro;
use derive_syn_parse::Parse;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Error, Ident, Result, Token,
    parse_macro_input, token,
};


// ----- TERMS -----
enum Term {
    Var(Ident),
    Const(syn::ExprLit),
}

impl Parse for Term {
    fn parse(input: ParseStream) -> Result<Term> {
        Ok(if input.peek(syn::Ident) {
            Term::Var(input.parse()?)
        } else {
            Term::Const(input.parse()?)
        })
    }
}

impl ToTokens for Term {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Term::Var(id) => id.to_tokens(tokens),
            Term::Const(lit) => lit.to_tokens(tokens),
        }
    }
}


// ----- ATOMS AND QUERIES -----
// An atom `r(x)` names a sorted sequence `r` in scope and binds its elements
// to `x`.
#[derive(Parse)]
struct Atom {
    pred: Ident,
    #[paren]
    paren_token: token::Paren,
    #[inside(paren_token)]
    #[call(Punctuated::parse_terminated)]
    args: Punctuated<Term, Token![,]>,
}

#[derive(Parse)]
struct Query {
    #[call(Punctuated::parse_separated_nonempty)]
    atoms: Punctuated<Atom, Token![,]>,
}

impl Atom {
    // Only flat, single-variable intersections are supported; anything with
    // more columns would need a trie join.
    fn var(&self) -> Result<&Ident> {
        let mut args = self.args.iter();
        match (args.next(), args.next()) {
            (Some(Term::Var(x)), None) => Ok(x),
            (Some(term @ Term::Const(_)), None) =>
                Err(Error::new_spanned(term, "constants are not supported in join!")),
            (None, _) =>
                Err(Error::new(self.paren_token.span.join(), "expected exactly one variable")),
            (Some(_), Some(extra)) =>
                Err(Error::new_spanned(extra, "join! only intersects on a single variable")),
        }
    }
}

impl Query {
    fn check(&self) -> Result<()> {
        let mut vars = self.atoms.iter().map(Atom::var);
        let Some(first) = vars.next() else { return Ok(()) };
        let first = first?;
        for var in vars {
            let var = var?;
            if var != first {
                let msg = format!("every atom must use the same variable; expected `{first}`");
                return Err(Error::new_spanned(var, msg));
            }
        }
        Ok(())
    }

    fn expand(&self) -> TokenStream {
        if let Err(err) = self.check() { return err.to_compile_error() }
        let preds = self.atoms.iter().map(|atom| &atom.pred);
        quote! {
            ::leapfrog::Leapfrog::from_slices(::std::vec![
                #( ::core::convert::AsRef::<[_]>::as_ref(&#preds) ),*
            ])
        }
    }
}


// ----- MACROS -----
/// `join!(r(x), s(x), t(x))` builds a `Leapfrog` over the sorted slices `r`,
/// `s` and `t`, yielding the values of `x` found in all of them.
#[proc_macro]
pub fn join(tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
    parse_macro_input!(tokens as Query).expand().into()
}
