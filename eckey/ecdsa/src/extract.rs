/*!
    Raw key extraction from PEM-framed PKCS#8, SEC1 and SPKI containers.

    Supported shapes:
    - `PRIVATE KEY`: PKCS#8 `PrivateKeyInfo`
      `[version, AlgorithmIdentifier, OCTET STRING(ECPrivateKey)]`
    - `EC PRIVATE KEY`: SEC1 `ECPrivateKey`
      `[version, OCTET STRING D, [0] curve?, [1] BIT STRING point?]`
    - `PUBLIC KEY`: `SubjectPublicKeyInfo`
      `[AlgorithmIdentifier, BIT STRING point]`

    The private shapes are told apart structurally, not by label, since
    either can show up under either label in the wild.
*/

use zeroize::Zeroizing;

use eckey_core::{Curve, EC_PUBLIC_KEY_OID, KeyKind};
use eckey_der::{Asn1Node, ObjectIdentifier};

use crate::error::{KeyError, KeyResult};
use crate::material::KeyMaterial;
use crate::pem::{PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL, PemBlock};

/// SEC1 uncompressed point marker.
const UNCOMPRESSED: u8 = 0x04;

/**
    Extract raw key material from PEM text.

    The PEM label decides between the private and public paths: any label
    containing `PRIVATE KEY` is private.
*/
pub fn extract_key(text: &str) -> KeyResult<KeyMaterial> {
    if text.trim().is_empty() {
        return Err(KeyError::InvalidKeyFormat("empty key text".into()));
    }
    let block = PemBlock::parse(text)?;
    if block.label().contains("ENCRYPTED") {
        return Err(KeyError::InvalidKeyFormat(format!(
            "{} is not supported, decrypt the key first",
            block.label()
        )));
    }
    let kind = if block.is_private() {
        KeyKind::Private
    } else {
        KeyKind::Public
    };
    extract_der(block.der(), kind)
}

/**
    Extract raw key material from a DER container of the given kind.
*/
pub fn extract_der(der: &[u8], kind: KeyKind) -> KeyResult<KeyMaterial> {
    let root = eckey_der::read_all(der)?;
    let material = match kind {
        KeyKind::Private => private_key(&root)?,
        KeyKind::Public => public_key(&root)?,
    };
    tracing::debug!(
        curve = %material.curve(),
        kind = %material.kind(),
        "extracted EC key"
    );
    Ok(material)
}

fn private_key(root: &Asn1Node) -> KeyResult<KeyMaterial> {
    let fields = root
        .as_sequence()
        .ok_or_else(|| malformed("private key is not a SEQUENCE"))?;
    match fields {
        [_, Asn1Node::OctetString(_), ..] => {
            tracing::debug!("private key shape: SEC1 ECPrivateKey");
            ec_private_key(root, None)
        }
        [version, algorithm @ Asn1Node::Sequence(_), Asn1Node::OctetString(inner), ..] => {
            tracing::debug!("private key shape: PKCS#8 PrivateKeyInfo");
            check_version(version, &[0, 1], "PrivateKeyInfo")?;
            let curve = algorithm_identifier(algorithm)?;
            let inner = eckey_der::read_all(inner)?;
            ec_private_key(&inner, Some(curve))
        }
        [Asn1Node::Integer(_), Asn1Node::Integer(_), ..] => Err(KeyError::UnsupportedAlgorithm(
            "RSA (PKCS#1 RSAPrivateKey)".into(),
        )),
        _ => Err(malformed(
            "expected a PKCS#8 PrivateKeyInfo or SEC1 ECPrivateKey structure",
        )),
    }
}

/**
    Parse an `ECPrivateKey`. `outer_curve` is the curve named by an
    enclosing PKCS#8 AlgorithmIdentifier, if any.
*/
fn ec_private_key(node: &Asn1Node, outer_curve: Option<Curve>) -> KeyResult<KeyMaterial> {
    let fields = node
        .as_sequence()
        .ok_or_else(|| malformed("ECPrivateKey is not a SEQUENCE"))?;
    let [version, Asn1Node::OctetString(scalar), ..] = fields else {
        return Err(malformed(
            "ECPrivateKey must start with a version and an OCTET STRING scalar",
        ));
    };
    check_version(version, &[1], "ECPrivateKey")?;

    let embedded = node.context_field(0).map(named_curve).transpose()?;
    let curve = match (outer_curve, embedded) {
        (Some(outer), Some(inner)) if outer != inner => {
            return Err(malformed(format!(
                "AlgorithmIdentifier names {outer} but ECPrivateKey names {inner}"
            )));
        }
        (Some(curve), _) | (None, Some(curve)) => curve,
        (None, None) => return Err(malformed("ECPrivateKey does not name its curve")),
    };

    let public = node
        .context_field(1)
        .ok_or_else(|| malformed("ECPrivateKey does not embed its public key"))?;
    let [Asn1Node::BitString(bits)] = public else {
        return Err(malformed("[1] publicKey must hold exactly one BIT STRING"));
    };
    let point = uncompressed_point(bits, curve)?;
    let d = fit_width(scalar, curve.width(), "private scalar")?;

    KeyMaterial::private(curve, &d, point)
}

fn public_key(root: &Asn1Node) -> KeyResult<KeyMaterial> {
    let fields = root
        .as_sequence()
        .ok_or_else(|| malformed("public key is not a SEQUENCE"))?;
    let [algorithm, Asn1Node::BitString(bits)] = fields else {
        return Err(malformed(
            "SubjectPublicKeyInfo must hold an AlgorithmIdentifier and a BIT STRING",
        ));
    };
    let curve = algorithm_identifier(algorithm)?;
    let point = uncompressed_point(bits, curve)?;
    KeyMaterial::public(curve, point)
}

/**
    Check `AlgorithmIdentifier [id-ecPublicKey, namedCurve]` and return
    the curve.
*/
fn algorithm_identifier(node: &Asn1Node) -> KeyResult<Curve> {
    let fields = node
        .as_sequence()
        .ok_or_else(|| malformed("AlgorithmIdentifier is not a SEQUENCE"))?;
    let [Asn1Node::ObjectIdentifier(algorithm), params @ ..] = fields else {
        return Err(malformed(
            "AlgorithmIdentifier must start with an OBJECT IDENTIFIER",
        ));
    };
    if !algorithm.is(EC_PUBLIC_KEY_OID) {
        return Err(KeyError::UnsupportedAlgorithm(algorithm.to_string()));
    }
    named_curve(params)
}

// Only namedCurve is accepted; explicit (SEQUENCE) and implicitlyCA (NULL)
// parameters are not.
fn named_curve(params: &[Asn1Node]) -> KeyResult<Curve> {
    match params {
        [Asn1Node::ObjectIdentifier(oid)] => curve_from_oid(oid),
        [] => Err(KeyError::UnsupportedCurve("missing curve parameters".into())),
        [other, ..] => Err(KeyError::UnsupportedCurve(format!(
            "{} curve parameters",
            other.kind_name()
        ))),
    }
}

fn curve_from_oid(oid: &ObjectIdentifier) -> KeyResult<Curve> {
    Curve::from_oid(oid.arcs()).ok_or_else(|| KeyError::UnsupportedCurve(oid.to_string()))
}

/**
    Strip the unused-bits byte and the `0x04` marker from a public key
    BIT STRING, returning `X ‖ Y`.
*/
fn uncompressed_point(bits: &[u8], curve: Curve) -> KeyResult<&[u8]> {
    let [unused, marker, point @ ..] = bits else {
        return Err(malformed("public key BIT STRING is too short"));
    };
    if *unused != 0 {
        return Err(malformed(format!(
            "public key BIT STRING has {unused} unused bits"
        )));
    }
    match *marker {
        UNCOMPRESSED => {}
        0x02 | 0x03 => return Err(malformed("compressed points are not supported")),
        other => {
            return Err(malformed(format!(
                "unsupported point encoding 0x{other:02x}"
            )));
        }
    }
    let expected = 2 * curve.width();
    if point.len() != expected {
        return Err(malformed(format!(
            "{curve} point must be {expected} bytes, got {}",
            point.len()
        )));
    }
    Ok(point)
}

/**
    Left-pad a big-endian value to `width`. Leading zero bytes beyond
    `width` are dropped; anything else wider is an error.
*/
fn fit_width(value: &[u8], width: usize, what: &str) -> KeyResult<Zeroizing<Vec<u8>>> {
    let first = value
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(value.len())
        .min(value.len().saturating_sub(width));
    let value = &value[first..];
    if value.len() > width {
        return Err(malformed(format!(
            "{what} is {} bytes, wider than {width}",
            value.len()
        )));
    }
    let mut out = Zeroizing::new(vec![0u8; width]);
    out[width - value.len()..].copy_from_slice(value);
    Ok(out)
}

fn check_version(node: &Asn1Node, allowed: &[u8], structure: &str) -> KeyResult<()> {
    match node.as_integer() {
        Some([version]) if allowed.contains(version) => Ok(()),
        Some(_) => Err(malformed(format!("unsupported {structure} version"))),
        None => Err(malformed(format!("{structure} version is not an INTEGER"))),
    }
}

fn malformed(reason: impl Into<String>) -> KeyError {
    KeyError::MalformedKey(reason.into())
}

// ── Export ───────────────────────────────────────────────────────────────

fn algorithm_node(curve: Curve) -> Asn1Node {
    Asn1Node::Sequence(vec![
        Asn1Node::ObjectIdentifier(ObjectIdentifier::new(EC_PUBLIC_KEY_OID)),
        Asn1Node::ObjectIdentifier(ObjectIdentifier::new(curve.oid())),
    ])
}

fn point_node(material: &KeyMaterial) -> Asn1Node {
    let mut bits = Vec::with_capacity(2 + material.point().len());
    bits.push(0);
    bits.extend_from_slice(&material.sec1_point());
    Asn1Node::BitString(bits)
}

/**
    DER `SubjectPublicKeyInfo` for the public half of `material`.
*/
pub fn public_key_info_der(material: &KeyMaterial) -> Vec<u8> {
    Asn1Node::Sequence(vec![algorithm_node(material.curve()), point_node(material)]).to_der()
}

/**
    DER PKCS#8 `PrivateKeyInfo`, or `None` for public material.

    The inner `ECPrivateKey` omits `[0] parameters` (the curve is already
    named by the AlgorithmIdentifier) and carries `[1] publicKey`.
*/
pub fn private_key_info_der(material: &KeyMaterial) -> Option<Zeroizing<Vec<u8>>> {
    let d = material.d()?;
    let ec_private_key = Zeroizing::new(
        Asn1Node::Sequence(vec![
            Asn1Node::Integer(vec![1]),
            Asn1Node::OctetString(d.to_vec()),
            Asn1Node::ContextSpecific {
                number: 1,
                children: vec![point_node(material)],
            },
        ])
        .to_der(),
    );
    let info = Asn1Node::Sequence(vec![
        Asn1Node::Integer(vec![0]),
        algorithm_node(material.curve()),
        Asn1Node::OctetString(ec_private_key.to_vec()),
    ]);
    Some(Zeroizing::new(info.to_der()))
}

impl KeyMaterial {
    /**
        Encode as PEM: PKCS#8 `PRIVATE KEY` for private material,
        `PUBLIC KEY` (SPKI) otherwise.
    */
    pub fn to_pem(&self) -> Zeroizing<String> {
        let block = match private_key_info_der(self) {
            Some(der) => PemBlock::new(PRIVATE_KEY_LABEL, der.to_vec()),
            None => PemBlock::new(PUBLIC_KEY_LABEL, public_key_info_der(self)),
        };
        Zeroizing::new(block.encode())
    }
}
