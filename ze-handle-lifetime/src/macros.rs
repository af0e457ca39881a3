/// Declares [`HandleKind`](crate::HandleKind) and one typed handle per kind.
///
/// Every entry names the kind variant, the typed handle struct, the sub-API the kind belongs to
/// and the C type name the driver API uses for it.
macro_rules! handle_kinds {
    {
        $(
            $(#[doc = $doc:literal])*
            $kind:ident($handle:ident) = $api:ident, $type_name:literal;
        )+
    } => {
        /// The disjoint categories driver handles are partitioned into.
        ///
        /// Each kind has its own existence table in the registry, so equal raw values of two
        /// different kinds never alias.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum HandleKind {
            $(
                $(#[doc = $doc])*
                $kind,
            )+
        }

        impl HandleKind {
            /// The number of handle kinds.
            pub const COUNT: usize = [$(HandleKind::$kind),+].len();

            /// Every handle kind, in declaration order.
            pub const ALL: [HandleKind; HandleKind::COUNT] = [$(HandleKind::$kind),+];

            /// Returns the sub-API this kind belongs to.
            #[inline]
            pub const fn api(self) -> Api {
                match self {
                    $(HandleKind::$kind => Api::$api,)+
                }
            }

            /// Returns the name of the C handle type, e.g. `ze_device_handle_t`.
            #[inline]
            pub const fn type_name(self) -> &'static str {
                match self {
                    $(HandleKind::$kind => $type_name,)+
                }
            }

            #[inline]
            pub(crate) const fn index(self) -> usize {
                self as usize
            }
        }

        $(
            $(#[doc = $doc])*
            #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            #[repr(transparent)]
            pub struct $handle(u64);

            impl Handle for $handle {
                const KIND: HandleKind = HandleKind::$kind;

                #[inline]
                fn from_raw(raw: u64) -> Self {
                    $handle(raw)
                }

                #[inline]
                fn as_raw(self) -> u64 {
                    self.0
                }
            }

            impl fmt::Debug for $handle {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}({:#x})", stringify!($handle), self.0)
                }
            }
        )+
    };
}
